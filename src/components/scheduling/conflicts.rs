use super::interval::Interval;
use super::models::CalendarEvent;
use super::store::EventStore;

/// Stored events whose intervals overlap `candidate`, in store order.
///
/// Read-only and linear in the number of stored events.
pub fn detect_conflicts<'a>(store: &'a EventStore, candidate: &'a Interval) -> Vec<&'a CalendarEvent> {
    store.events_overlapping(candidate).collect()
}
