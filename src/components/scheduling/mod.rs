mod actor;
pub mod conflicts;
pub mod demo;
pub mod engine;
mod handle;
pub mod intent;
pub mod interval;
pub mod models;
pub mod store;
pub mod suggestions;

pub use engine::{DraftProposal, SchedulingEngine};
pub use handle::SchedulingHandle;
pub use interval::Interval;
pub use models::{CalendarEvent, Category, EventId, Priority, Suggestion, SuggestionKind};
pub use store::{AgendaDay, EventStore};

use super::audit::AuditActorHandle;
use crate::config::Config;
use crate::error::{component_error, EngineResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Scheduling component owning the engine actor
#[derive(Default)]
pub struct Scheduling {
    handle: RwLock<Option<SchedulingHandle>>,
}

impl Scheduling {
    /// Create a new Scheduling component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<SchedulingHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Scheduling {
    fn name(&self) -> &'static str {
        "scheduling"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, audit_handle: AuditActorHandle) -> EngineResult<()> {
        let config = config.read().await.clone();

        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_some() {
            warn!("Scheduling engine is already running, skipping initialization");
            return Ok(());
        }

        let handle = SchedulingHandle::new(&config, Arc::new(audit_handle));

        if config.seed_demo_events {
            let events = demo::demo_events(&config.default_actor)?;
            let count = events.len();
            for event in events {
                handle
                    .save(event, config.default_actor.clone())
                    .await
                    .map_err(|e| component_error(&format!("Failed to seed demo events: {}", e)))?;
            }
            info!("Seeded {} demo events", count);
        }

        *handle_lock = Some(handle);
        Ok(())
    }

    async fn shutdown(&self) -> EngineResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
