use super::engine::{DraftProposal, SchedulingEngine};
use super::interval::Interval;
use super::models::{CalendarEvent, EventId, Suggestion};
use super::store::AgendaDay;
use crate::error::{component_error, EngineResult};
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::info;

/// The scheduling actor; the only owner of the engine and its store
pub struct SchedulingActor {
    engine: SchedulingEngine,
    command_rx: mpsc::Receiver<SchedulingCommand>,
}

/// Commands that can be sent to the scheduling actor
pub enum SchedulingCommand {
    CreateDraft {
        phrase: String,
        date: NaiveDate,
        actor: String,
        response_tx: mpsc::Sender<EngineResult<DraftProposal>>,
    },
    Propose(CalendarEvent, mpsc::Sender<EngineResult<Vec<Suggestion>>>),
    Save(CalendarEvent, String, mpsc::Sender<EngineResult<EventId>>),
    Delete(EventId, String, mpsc::Sender<EngineResult<()>>),
    Get(EventId, mpsc::Sender<EngineResult<CalendarEvent>>),
    ListForDay(NaiveDate, mpsc::Sender<EngineResult<Vec<CalendarEvent>>>),
    ListOverlapping(Interval, mpsc::Sender<EngineResult<Vec<CalendarEvent>>>),
    Agenda(mpsc::Sender<EngineResult<Vec<AgendaDay>>>),
    Shutdown,
}

/// Handle for communicating with the scheduling actor
#[derive(Clone)]
pub struct SchedulingActorHandle {
    command_tx: mpsc::Sender<SchedulingCommand>,
}

impl SchedulingActorHandle {
    /// Send a command and wait for its single response
    async fn request<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<EngineResult<T>>) -> SchedulingCommand,
    ) -> EngineResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))?
    }

    pub async fn create_draft(
        &self,
        phrase: impl Into<String>,
        date: NaiveDate,
        actor: impl Into<String>,
    ) -> EngineResult<DraftProposal> {
        let phrase = phrase.into();
        let actor = actor.into();
        self.request(move |response_tx| SchedulingCommand::CreateDraft {
            phrase,
            date,
            actor,
            response_tx,
        })
        .await
    }

    pub async fn propose(&self, candidate: CalendarEvent) -> EngineResult<Vec<Suggestion>> {
        self.request(move |tx| SchedulingCommand::Propose(candidate, tx))
            .await
    }

    pub async fn save(&self, event: CalendarEvent, actor: impl Into<String>) -> EngineResult<EventId> {
        let actor = actor.into();
        self.request(move |tx| SchedulingCommand::Save(event, actor, tx))
            .await
    }

    pub async fn delete(&self, id: impl Into<EventId>, actor: impl Into<String>) -> EngineResult<()> {
        let id = id.into();
        let actor = actor.into();
        self.request(move |tx| SchedulingCommand::Delete(id, actor, tx))
            .await
    }

    pub async fn get(&self, id: impl Into<EventId>) -> EngineResult<CalendarEvent> {
        let id = id.into();
        self.request(move |tx| SchedulingCommand::Get(id, tx)).await
    }

    pub async fn list_for_day(&self, date: NaiveDate) -> EngineResult<Vec<CalendarEvent>> {
        self.request(move |tx| SchedulingCommand::ListForDay(date, tx))
            .await
    }

    pub async fn list_overlapping(&self, interval: Interval) -> EngineResult<Vec<CalendarEvent>> {
        self.request(move |tx| SchedulingCommand::ListOverlapping(interval, tx))
            .await
    }

    pub async fn agenda(&self) -> EngineResult<Vec<AgendaDay>> {
        self.request(SchedulingCommand::Agenda).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> EngineResult<()> {
        let _ = self.command_tx.send(SchedulingCommand::Shutdown).await;
        Ok(())
    }
}

impl SchedulingActor {
    /// Create a new actor around `engine` and return its handle
    pub fn new(engine: SchedulingEngine, mailbox_capacity: usize) -> (Self, SchedulingActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(mailbox_capacity.max(1));

        let actor = Self { engine, command_rx };
        let handle = SchedulingActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop.
    ///
    /// Commands run one at a time, so a write never interleaves with a read.
    pub async fn run(&mut self) {
        info!("Scheduling actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                SchedulingCommand::CreateDraft {
                    phrase,
                    date,
                    actor,
                    response_tx,
                } => {
                    let result = self.engine.create_draft(&phrase, date, &actor);
                    let _ = response_tx.send(result).await;
                }
                SchedulingCommand::Propose(candidate, response_tx) => {
                    let result = self.engine.propose(&candidate);
                    let _ = response_tx.send(result).await;
                }
                SchedulingCommand::Save(event, actor, response_tx) => {
                    let result = self.engine.save(event, &actor);
                    let _ = response_tx.send(result).await;
                }
                SchedulingCommand::Delete(id, actor, response_tx) => {
                    let result = self.engine.delete(&id, &actor);
                    let _ = response_tx.send(result).await;
                }
                SchedulingCommand::Get(id, response_tx) => {
                    let result = self.engine.get(&id);
                    let _ = response_tx.send(result).await;
                }
                SchedulingCommand::ListForDay(date, response_tx) => {
                    let _ = response_tx.send(Ok(self.engine.list_for_day(date))).await;
                }
                SchedulingCommand::ListOverlapping(interval, response_tx) => {
                    let _ = response_tx
                        .send(Ok(self.engine.list_overlapping(&interval)))
                        .await;
                }
                SchedulingCommand::Agenda(response_tx) => {
                    let _ = response_tx.send(Ok(self.engine.agenda())).await;
                }
                SchedulingCommand::Shutdown => {
                    info!("Scheduling actor shutting down");
                    break;
                }
            }
        }

        info!("Scheduling actor shut down");
    }
}
