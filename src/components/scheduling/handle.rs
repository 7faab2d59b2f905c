use super::actor::{SchedulingActor, SchedulingActorHandle};
use super::engine::{DraftProposal, SchedulingEngine};
use super::interval::Interval;
use super::models::{CalendarEvent, EventId, Suggestion};
use super::store::AgendaDay;
use crate::components::audit::AuditSink;
use crate::config::Config;
use crate::error::EngineResult;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the scheduling actor
#[derive(Clone)]
pub struct SchedulingHandle {
    actor_handle: SchedulingActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl SchedulingHandle {
    /// Create a new SchedulingHandle and spawn the actor
    pub fn new(config: &Config, audit: Arc<dyn AuditSink>) -> Self {
        Self::spawn(
            SchedulingEngine::new(audit, config.delete_policy),
            config.mailbox_capacity,
        )
    }

    /// Spawn an actor around an already built engine
    pub fn spawn(engine: SchedulingEngine, mailbox_capacity: usize) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = SchedulingActor::new(engine, mailbox_capacity);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Parse a phrase into a draft on `date` with suggestions
    pub async fn create_draft(
        &self,
        phrase: impl Into<String>,
        date: NaiveDate,
        actor: impl Into<String>,
    ) -> EngineResult<DraftProposal> {
        self.actor_handle.create_draft(phrase, date, actor).await
    }

    /// Suggestions for a candidate, without storing it
    pub async fn propose(&self, candidate: CalendarEvent) -> EngineResult<Vec<Suggestion>> {
        self.actor_handle.propose(candidate).await
    }

    /// Insert or update by presence of `id`
    pub async fn save(&self, event: CalendarEvent, actor: impl Into<String>) -> EngineResult<EventId> {
        self.actor_handle.save(event, actor).await
    }

    pub async fn delete(&self, id: impl Into<EventId>, actor: impl Into<String>) -> EngineResult<()> {
        self.actor_handle.delete(id, actor).await
    }

    pub async fn get(&self, id: impl Into<EventId>) -> EngineResult<CalendarEvent> {
        self.actor_handle.get(id).await
    }

    pub async fn list_for_day(&self, date: NaiveDate) -> EngineResult<Vec<CalendarEvent>> {
        self.actor_handle.list_for_day(date).await
    }

    pub async fn list_overlapping(&self, interval: Interval) -> EngineResult<Vec<CalendarEvent>> {
        self.actor_handle.list_overlapping(interval).await
    }

    pub async fn agenda(&self) -> EngineResult<Vec<AgendaDay>> {
        self.actor_handle.agenda().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> EngineResult<()> {
        self.actor_handle.shutdown().await
    }
}
