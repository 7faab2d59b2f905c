use super::interval::Interval;
use super::models::{CalendarEvent, EventId};
use crate::error::{not_found_error, validation_error, EngineResult};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Events of one calendar day, in start order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

/// In-memory event collection kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All stored events in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.position(id).map(|idx| &self.events[idx])
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events
            .iter()
            .position(|event| event.id.as_deref() == Some(id))
    }

    /// Store a new event, assigning an id when it has none
    pub fn insert(&mut self, mut event: CalendarEvent) -> EngineResult<EventId> {
        event.validate()?;

        let id = match event.id.take() {
            Some(id) if id.trim().is_empty() => {
                return Err(validation_error("Event id must not be blank"));
            }
            Some(id) if self.contains(&id) => {
                return Err(validation_error(&format!("Event id {} already exists", id)));
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        event.id = Some(id.clone());
        event.normalize()?;
        debug!("Inserted event {} ({})", id, event.title);
        self.events.push(event);

        Ok(id)
    }

    /// Replace a stored event, keeping its id, position and author
    pub fn update(&mut self, id: &str, mut event: CalendarEvent) -> EngineResult<()> {
        let idx = self.position(id).ok_or_else(|| not_found_error(id))?;
        event.validate()?;

        let stored = &mut self.events[idx];
        event.id = stored.id.clone();
        event.created_by = stored.created_by.clone();
        event.normalize()?;
        *stored = event;
        debug!("Updated event {}", id);

        Ok(())
    }

    /// Remove an event, returning it
    pub fn delete(&mut self, id: &str) -> EngineResult<CalendarEvent> {
        let idx = self.position(id).ok_or_else(|| not_found_error(id))?;
        debug!("Deleted event {}", id);
        Ok(self.events.remove(idx))
    }

    /// Events whose interval overlaps `interval`, in insertion order
    pub fn events_overlapping<'a>(
        &'a self,
        interval: &'a Interval,
    ) -> impl Iterator<Item = &'a CalendarEvent> + 'a {
        self.events.iter().filter(move |event| {
            event
                .interval()
                .map(|span| span.overlaps(interval))
                .unwrap_or(false)
        })
    }

    /// Events starting on `date`, ignoring time of day
    pub fn events_on_day(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEvent> + '_ {
        self.events.iter().filter(move |event| event.day() == date)
    }

    /// All events sorted by start and grouped per day
    pub fn agenda(&self) -> Vec<AgendaDay> {
        let mut sorted: Vec<&CalendarEvent> = self.events.iter().collect();
        // Stable sort keeps insertion order for equal starts
        sorted.sort_by_key(|event| event.start);

        let mut days: Vec<AgendaDay> = Vec::new();
        for event in sorted {
            match days.last_mut() {
                Some(day) if day.date == event.day() => day.events.push(event.clone()),
                _ => days.push(AgendaDay {
                    date: event.day(),
                    events: vec![event.clone()],
                }),
            }
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::{parse_date, parse_datetime};

    fn event(title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(
            title,
            parse_datetime(start).unwrap(),
            parse_datetime(end).unwrap(),
        )
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let mut store = EventStore::new();
        let a = store
            .insert(event("A", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap();
        let b = store
            .insert(event("B", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a).unwrap().title, "A");
        assert_eq!(store.get(&a).unwrap().id.as_deref(), Some(a.as_str()));
    }

    #[test]
    fn test_insert_keeps_explicit_id_and_rejects_duplicates() {
        let mut store = EventStore::new();
        let id = store
            .insert(event("A", "2025-01-15T09:00", "2025-01-15T10:00").with_id("evt-1"))
            .unwrap();
        assert_eq!(id, "evt-1");

        let err = store
            .insert(event("B", "2025-01-15T11:00", "2025-01-15T12:00").with_id("evt-1"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_validates() {
        let mut store = EventStore::new();
        assert!(store
            .insert(event("", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap_err()
            .is_validation());
        assert!(store
            .insert(event("A", "2025-01-15T10:00", "2025-01-15T10:00"))
            .unwrap_err()
            .is_validation());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut store = EventStore::new();
        let id = store
            .insert(event("A", "2025-01-15T09:00", "2025-01-15T10:00").created_by("alice"))
            .unwrap();
        store
            .insert(event("B", "2025-01-15T12:00", "2025-01-15T13:00"))
            .unwrap();

        let replacement = event("A2", "2025-01-15T10:00", "2025-01-15T11:00").created_by("mallory");
        store.update(&id, replacement).unwrap();

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.title, "A2");
        assert_eq!(stored.created_by, "alice");
        assert_eq!(stored.id.as_deref(), Some(id.as_str()));
        // Position in insertion order is unchanged
        assert_eq!(store.iter().next().unwrap().title, "A2");
    }

    #[test]
    fn test_update_errors() {
        let mut store = EventStore::new();
        let err = store
            .update("missing", event("A", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap_err();
        assert!(err.is_not_found());

        let id = store
            .insert(event("A", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap();
        let err = store
            .update(&id, event("", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(&id).unwrap().title, "A");
    }

    #[test]
    fn test_delete() {
        let mut store = EventStore::new();
        let id = store
            .insert(event("A", "2025-01-15T09:00", "2025-01-15T10:00"))
            .unwrap();

        let removed = store.delete(&id).unwrap();
        assert_eq!(removed.title, "A");
        assert!(store.is_empty());
        assert!(store.delete(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_overlapping_keeps_insertion_order() {
        let mut store = EventStore::new();
        store
            .insert(event("late", "2025-01-15T10:00", "2025-01-15T12:00"))
            .unwrap();
        store
            .insert(event("early", "2025-01-15T08:00", "2025-01-15T10:30"))
            .unwrap();
        store
            .insert(event("touching", "2025-01-15T12:00", "2025-01-15T13:00"))
            .unwrap();

        let query = Interval::new(
            parse_datetime("2025-01-15T10:00").unwrap(),
            parse_datetime("2025-01-15T12:00").unwrap(),
        )
        .unwrap();
        let titles: Vec<&str> = store
            .events_overlapping(&query)
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["late", "early"]);
    }

    #[test]
    fn test_all_day_events_cover_whole_day() {
        let mut store = EventStore::new();
        let mut holiday = event("Holiday", "2025-01-15T15:00", "2025-01-15T15:00");
        holiday.is_all_day = true;
        let id = store.insert(holiday).unwrap();

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.start, parse_datetime("2025-01-15T00:00").unwrap());
        assert_eq!(stored.end, parse_datetime("2025-01-16T00:00").unwrap());

        let late_evening = Interval::new(
            parse_datetime("2025-01-15T23:00").unwrap(),
            parse_datetime("2025-01-15T23:30").unwrap(),
        )
        .unwrap();
        assert_eq!(store.events_overlapping(&late_evening).count(), 1);
    }

    #[test]
    fn test_events_on_day_ignores_time() {
        let mut store = EventStore::new();
        store
            .insert(event("morning", "2025-01-15T07:00", "2025-01-15T08:00"))
            .unwrap();
        store
            .insert(event("night", "2025-01-15T23:00", "2025-01-16T01:00"))
            .unwrap();
        store
            .insert(event("tomorrow", "2025-01-16T09:00", "2025-01-16T10:00"))
            .unwrap();

        let day = parse_date("2025-01-15").unwrap();
        let titles: Vec<&str> = store.events_on_day(day).map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["morning", "night"]);
    }

    #[test]
    fn test_agenda_groups_by_day_in_start_order() {
        let mut store = EventStore::new();
        store
            .insert(event("second day", "2025-01-16T09:00", "2025-01-16T10:00"))
            .unwrap();
        store
            .insert(event("first day late", "2025-01-15T15:00", "2025-01-15T16:00"))
            .unwrap();
        store
            .insert(event("first day early", "2025-01-15T08:00", "2025-01-15T09:00"))
            .unwrap();

        let agenda = store.agenda();
        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[0].date, parse_date("2025-01-15").unwrap());
        let first: Vec<&str> = agenda[0].events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(first, vec!["first day early", "first day late"]);
        assert_eq!(agenda[1].events[0].title, "second day");
    }
}
