use super::intent::{extract_draft, DraftIntent};
use super::interval::Interval;
use super::models::{CalendarEvent, EventId, Suggestion};
use super::store::{AgendaDay, EventStore};
use super::suggestions::generate_suggestions;
use crate::components::audit::{AuditAction, AuditEntry, AuditSink, EventSummary, TracingAuditSink};
use crate::config::DeletePolicy;
use crate::error::{not_found_error, EngineResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A draft built from a phrase, with the advice computed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftProposal {
    pub draft: CalendarEvent,
    pub intent: DraftIntent,
    pub suggestions: Vec<Suggestion>,
}

/// Conflict checking, suggestions and CRUD over one event store
pub struct SchedulingEngine {
    store: EventStore,
    audit: Arc<dyn AuditSink>,
    delete_policy: DeletePolicy,
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new(Arc::new(TracingAuditSink), DeletePolicy::default())
    }
}

impl SchedulingEngine {
    pub fn new(audit: Arc<dyn AuditSink>, delete_policy: DeletePolicy) -> Self {
        Self::with_store(EventStore::new(), audit, delete_policy)
    }

    /// Wrap an existing store
    pub fn with_store(store: EventStore, audit: Arc<dyn AuditSink>, delete_policy: DeletePolicy) -> Self {
        Self {
            store,
            audit,
            delete_policy,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Parse a phrase into a draft on `date` and advise on it.
    ///
    /// Nothing is stored.
    pub fn create_draft(&self, phrase: &str, date: NaiveDate, actor: &str) -> EngineResult<DraftProposal> {
        let (draft, intent) = extract_draft(phrase, date, actor)?;
        let suggestions = generate_suggestions(&self.store, &draft)?;
        debug!(
            "Draft '{}' as {} with {} suggestion(s)",
            draft.title,
            draft.category,
            suggestions.len()
        );

        Ok(DraftProposal {
            draft,
            intent,
            suggestions,
        })
    }

    /// Advise on a candidate without storing it
    pub fn propose(&self, candidate: &CalendarEvent) -> EngineResult<Vec<Suggestion>> {
        generate_suggestions(&self.store, candidate)
    }

    /// Insert an event without an id, update one with an id
    pub fn save(&mut self, mut event: CalendarEvent, actor: &str) -> EngineResult<EventId> {
        let (id, action) = match event.id.clone() {
            Some(id) => {
                self.store.update(&id, event)?;
                (id, AuditAction::Updated)
            }
            None => {
                if event.created_by.trim().is_empty() {
                    event.created_by = actor.to_string();
                }
                (self.store.insert(event)?, AuditAction::Created)
            }
        };

        if let Some(stored) = self.store.get(&id) {
            info!("{} event {} ({})", action, id, stored.title);
            self.audit
                .record(AuditEntry::new(actor, action, EventSummary::of(&id, stored)));
        }

        Ok(id)
    }

    /// Remove an event; unknown ids follow the delete policy
    pub fn delete(&mut self, id: &str, actor: &str) -> EngineResult<()> {
        match self.store.delete(id) {
            Ok(removed) => {
                info!("Deleted event {} ({})", id, removed.title);
                self.audit.record(AuditEntry::new(
                    actor,
                    AuditAction::Deleted,
                    EventSummary::of(id, &removed),
                ));
                Ok(())
            }
            Err(e) if e.is_not_found() && self.delete_policy == DeletePolicy::Idempotent => {
                debug!("Delete of unknown event {} ignored", id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn get(&self, id: &str) -> EngineResult<CalendarEvent> {
        self.store.get(id).cloned().ok_or_else(|| not_found_error(id))
    }

    pub fn list_for_day(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.store.events_on_day(date).cloned().collect()
    }

    pub fn list_overlapping(&self, interval: &Interval) -> Vec<CalendarEvent> {
        self.store.events_overlapping(interval).cloned().collect()
    }

    pub fn agenda(&self) -> Vec<AgendaDay> {
        self.store.agenda()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::scheduling::models::{Category, SuggestionKind};
    use crate::utils::time::{parse_date, parse_datetime};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, entry: AuditEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    fn event(title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(
            title,
            parse_datetime(start).unwrap(),
            parse_datetime(end).unwrap(),
        )
    }

    #[test]
    fn test_save_inserts_then_updates() {
        let sink = Arc::new(RecordingSink::default());
        let mut engine = SchedulingEngine::new(sink.clone(), DeletePolicy::Strict);

        let id = engine
            .save(event("Walkthrough", "2025-01-15T09:00", "2025-01-15T10:00"), "alice")
            .unwrap();
        let mut stored = engine.get(&id).unwrap();
        assert_eq!(stored.created_by, "alice");

        stored.title = "Walkthrough (moved)".to_string();
        stored.start = parse_datetime("2025-01-15T11:00").unwrap();
        stored.end = parse_datetime("2025-01-15T12:00").unwrap();
        assert_eq!(engine.save(stored, "bob").unwrap(), id);

        assert_eq!(engine.store().len(), 1);
        let updated = engine.get(&id).unwrap();
        assert_eq!(updated.title, "Walkthrough (moved)");
        assert_eq!(updated.created_by, "alice");

        let entries = sink.entries.lock().unwrap();
        let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Created, AuditAction::Updated]);
        assert_eq!(entries[1].actor, "bob");
    }

    #[test]
    fn test_failed_save_is_not_audited() {
        let sink = Arc::new(RecordingSink::default());
        let mut engine = SchedulingEngine::new(sink.clone(), DeletePolicy::Strict);

        let err = engine
            .save(event("", "2025-01-15T09:00", "2025-01-15T10:00"), "alice")
            .unwrap_err();
        assert!(err.is_validation());

        let err = engine
            .save(
                event("Ghost", "2025-01-15T09:00", "2025-01-15T10:00").with_id("nope"),
                "alice",
            )
            .unwrap_err();
        assert!(err.is_not_found());

        assert!(engine.store().is_empty());
        assert!(sink.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_delete_policies() {
        let mut strict = SchedulingEngine::new(Arc::new(TracingAuditSink), DeletePolicy::Strict);
        assert!(strict.delete("missing", "alice").unwrap_err().is_not_found());

        let sink = Arc::new(RecordingSink::default());
        let mut lenient = SchedulingEngine::new(sink.clone(), DeletePolicy::Idempotent);
        assert!(lenient.delete("missing", "alice").is_ok());
        assert!(sink.entries.lock().unwrap().is_empty());

        let id = lenient
            .save(event("Tour", "2025-01-15T09:00", "2025-01-15T10:00"), "alice")
            .unwrap();
        lenient.delete(&id, "alice").unwrap();
        assert!(lenient.get(&id).unwrap_err().is_not_found());
        assert_eq!(
            sink.entries.lock().unwrap().last().map(|e| e.action),
            Some(AuditAction::Deleted)
        );
    }

    #[test]
    fn test_create_draft_does_not_store() {
        let mut engine = SchedulingEngine::default();
        engine
            .save(
                event("Inspection - Sunset", "2025-01-21T09:00", "2025-01-21T11:00"),
                "alice",
            )
            .unwrap();

        let proposal = engine
            .create_draft(
                "Schedule property inspection next Tuesday morning",
                parse_date("2025-01-21").unwrap(),
                "alice",
            )
            .unwrap();

        assert_eq!(proposal.draft.category, Category::Inspection);
        assert_eq!(proposal.intent.duration_minutes, 120);
        let kinds: Vec<SuggestionKind> = proposal.suggestions.iter().map(Suggestion::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::Conflict,
                SuggestionKind::Optimization,
                SuggestionKind::Efficiency
            ]
        );
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn test_listing() {
        let mut engine = SchedulingEngine::default();
        engine
            .save(event("A", "2025-01-15T09:00", "2025-01-15T10:00"), "alice")
            .unwrap();
        engine
            .save(event("B", "2025-01-16T09:00", "2025-01-16T10:00"), "alice")
            .unwrap();

        let day = engine.list_for_day(parse_date("2025-01-16").unwrap());
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "B");

        let span = Interval::new(
            parse_datetime("2025-01-15T09:30").unwrap(),
            parse_datetime("2025-01-16T09:30").unwrap(),
        )
        .unwrap();
        assert_eq!(engine.list_overlapping(&span).len(), 2);
        assert_eq!(engine.agenda().len(), 2);
    }
}
