use crate::commands::CommandResult;
use crate::components::scheduling::{CalendarEvent, Suggestion};
use schemars::schema_for;
use serde_json::json;

/// Simple liveness check
pub fn ping() -> String {
    "pong".to_string()
}

/// Usage text for the console
pub fn help() -> String {
    [
        "draft <phrase>                     draft an event for today from free text",
        "draft-on <YYYY-MM-DD> <phrase>     draft an event on a given day",
        "propose <event-json>               suggestions for a candidate event",
        "save <event-json>                  insert (no id) or update (with id)",
        "delete <id>                        remove an event",
        "get <id>                           show one event",
        "day <YYYY-MM-DD>                   events on a day",
        "overlap <start> <end>              events overlapping [start, end)",
        "agenda                             all events grouped by day",
        "schema                             JSON schemas for events and suggestions",
        "ping                               liveness check",
        "help                               this text",
    ]
    .join("\n")
}

/// JSON schemas of the payloads the console accepts and returns
pub fn schema() -> CommandResult {
    let event_schema = schema_for!(CalendarEvent);
    let suggestion_schema = schema_for!(Suggestion);
    let schemas = json!({
        "calendarEvent": event_schema,
        "suggestion": suggestion_schema,
    });
    Ok(serde_json::to_string_pretty(&schemas)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        for name in ["draft", "draft-on", "propose", "save", "delete", "get", "day", "overlap", "agenda", "schema", "ping", "help"] {
            assert!(text.lines().any(|line| line.starts_with(name)), "{}", name);
        }
    }

    #[test]
    fn test_schema_names_event_fields() {
        let text = schema().unwrap();
        assert!(text.contains("isAllDay"));
        assert!(text.contains("createdBy"));
        assert!(text.contains("relatedEvents"));
    }
}
