mod actor;

pub use actor::{AuditActor, AuditActorHandle};

use crate::components::scheduling::models::{CalendarEvent, Category, EventId, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// What happened to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Created => write!(f, "Created"),
            AuditAction::Updated => write!(f, "Updated"),
            AuditAction::Deleted => write!(f, "Deleted"),
        }
    }
}

/// Compact description of the affected event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub has_attendees: bool,
}

impl EventSummary {
    pub fn of(id: &str, event: &CalendarEvent) -> Self {
        Self {
            id: id.to_string(),
            title: event.title.clone(),
            category: event.category,
            priority: event.priority,
            has_attendees: !event.attendees.is_empty(),
        }
    }
}

/// One audit record, sent after a successful save or delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub actor: String,
    pub action: AuditAction,
    pub event_summary: EventSummary,
}

impl AuditEntry {
    pub fn new(actor: impl Into<String>, action: AuditAction, event_summary: EventSummary) -> Self {
        Self {
            actor: actor.into(),
            action,
            event_summary,
        }
    }

    /// Human readable line, e.g. `Created calendar event: Roof check`
    pub fn describe(&self) -> String {
        format!("{} calendar event: {}", self.action, self.event_summary.title)
    }
}

/// Receiver of audit records.
///
/// `record` must not block and has no error channel: a sink that cannot
/// deliver an entry logs and drops it.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry);
}

/// Sink that only writes the entry to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: AuditEntry) {
        info!(
            target: "audit",
            actor = %entry.actor,
            event_id = %entry.event_summary.id,
            category = %entry.event_summary.category,
            "{}",
            entry.describe()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_datetime;

    #[test]
    fn test_summary_and_description() {
        let event = CalendarEvent::new(
            "Roof check",
            parse_datetime("2025-01-15T09:00").unwrap(),
            parse_datetime("2025-01-15T10:00").unwrap(),
        )
        .with_attendees(["roofer@example.com"]);

        let entry = AuditEntry::new("alice", AuditAction::Updated, EventSummary::of("e1", &event));
        assert_eq!(entry.describe(), "Updated calendar event: Roof check");
        assert!(entry.event_summary.has_attendees);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["action"], "updated");
        assert_eq!(json["eventSummary"]["hasAttendees"], true);
    }
}
