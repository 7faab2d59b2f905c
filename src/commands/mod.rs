use crate::components::scheduling::{CalendarEvent, EventId, Interval, SchedulingHandle};
use crate::config::Config;
use crate::error::{validation_error, EngineResult};
use crate::utils::time::{parse_date, parse_datetime};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

// Export submodules
pub mod calendar;
pub mod util;

/// Shared context for all commands
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<RwLock<Config>>,
    pub handle: SchedulingHandle,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Arc<RwLock<Config>>, handle: SchedulingHandle) -> Self {
        Self { config, handle }
    }
}

/// Type alias for command result; the text to print
pub type CommandResult = EngineResult<String>;

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Draft { date: Option<NaiveDate>, phrase: String },
    Propose(CalendarEvent),
    Save(CalendarEvent),
    Delete(EventId),
    Get(EventId),
    Day(NaiveDate),
    Overlap(Interval),
    Agenda,
    Schema,
    Ping,
    Help,
}

/// Parse a console line; blank lines and `#` comments yield `None`
pub fn parse_command(line: &str) -> EngineResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_lowercase().as_str() {
        "draft" => Command::Draft {
            date: None,
            phrase: required(rest, "draft <phrase>")?.to_string(),
        },
        "draft-on" => {
            let (date, phrase) = required(rest, "draft-on <YYYY-MM-DD> <phrase>")?
                .split_once(char::is_whitespace)
                .ok_or_else(|| validation_error("usage: draft-on <YYYY-MM-DD> <phrase>"))?;
            Command::Draft {
                date: Some(parse_date(date)?),
                phrase: phrase.trim().to_string(),
            }
        }
        "propose" => Command::Propose(parse_event(required(rest, "propose <event-json>")?)?),
        "save" => Command::Save(parse_event(required(rest, "save <event-json>")?)?),
        "delete" => Command::Delete(required(rest, "delete <id>")?.to_string()),
        "get" => Command::Get(required(rest, "get <id>")?.to_string()),
        "day" => Command::Day(parse_date(required(rest, "day <YYYY-MM-DD>")?)?),
        "overlap" => {
            let mut parts = required(rest, "overlap <start> <end>")?.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(start), Some(end), None) => {
                    Command::Overlap(Interval::new(parse_datetime(start)?, parse_datetime(end)?)?)
                }
                _ => return Err(validation_error("usage: overlap <start> <end>")),
            }
        }
        "agenda" => Command::Agenda,
        "schema" => Command::Schema,
        "ping" => Command::Ping,
        "help" => Command::Help,
        other => {
            return Err(validation_error(&format!(
                "Unknown command '{}', try 'help'",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &str) -> EngineResult<&'a str> {
    if rest.is_empty() {
        Err(validation_error(&format!("usage: {}", usage)))
    } else {
        Ok(rest)
    }
}

fn parse_event(json: &str) -> EngineResult<CalendarEvent> {
    serde_json::from_str(json)
        .map_err(|e| validation_error(&format!("Invalid event JSON: {}", e)))
}

/// Run a parsed command against the engine
pub async fn execute(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Draft { date, phrase } => calendar::draft(ctx, date, &phrase).await,
        Command::Propose(candidate) => calendar::propose(ctx, candidate).await,
        Command::Save(event) => calendar::save(ctx, event).await,
        Command::Delete(id) => calendar::delete(ctx, id).await,
        Command::Get(id) => calendar::get(ctx, id).await,
        Command::Day(date) => calendar::day(ctx, date).await,
        Command::Overlap(interval) => calendar::overlap(ctx, interval).await,
        Command::Agenda => calendar::agenda(ctx).await,
        Command::Schema => util::schema(),
        Command::Ping => Ok(util::ping()),
        Command::Help => Ok(util::help()),
    }
}
