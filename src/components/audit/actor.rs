use super::{AuditEntry, AuditSink, TracingAuditSink};
use crate::config::Config;
use crate::error::EngineResult;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{error, info, warn};

/// The audit actor that writes entries as they arrive
pub struct AuditActor {
    log_path: Option<PathBuf>,
    command_rx: mpsc::Receiver<AuditCommand>,
}

/// Commands that can be sent to the audit actor
pub enum AuditCommand {
    Record(AuditEntry),
    Shutdown,
}

/// Handle for communicating with the audit actor
#[derive(Clone)]
pub struct AuditActorHandle {
    command_tx: mpsc::Sender<AuditCommand>,
}

impl AuditActorHandle {
    /// Create a handle with no actor behind it; every entry is dropped
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(1);
        Self { command_tx }
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> EngineResult<()> {
        let _ = self.command_tx.send(AuditCommand::Shutdown).await;
        Ok(())
    }
}

impl AuditSink for AuditActorHandle {
    fn record(&self, entry: AuditEntry) {
        match self.command_tx.try_send(AuditCommand::Record(entry)) {
            Ok(()) => {}
            Err(TrySendError::Full(AuditCommand::Record(entry))) => {
                warn!("Audit mailbox full, dropping entry: {}", entry.describe());
            }
            Err(TrySendError::Closed(AuditCommand::Record(entry))) => {
                warn!("Audit actor not running, dropping entry: {}", entry.describe());
            }
            Err(_) => {}
        }
    }
}

impl AuditActor {
    /// Create a new actor and return its handle
    pub fn new(config: &Config) -> (Self, AuditActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.mailbox_capacity.max(1));

        let actor = Self {
            log_path: config.audit_log_path.as_ref().map(PathBuf::from),
            command_rx,
        };

        let handle = AuditActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Audit actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AuditCommand::Record(entry) => {
                    TracingAuditSink.record(entry.clone());
                    if let Err(e) = self.append_to_file(&entry).await {
                        error!("Failed to write audit entry: {}", e);
                    }
                }
                AuditCommand::Shutdown => {
                    info!("Audit actor shutting down");
                    break;
                }
            }
        }

        info!("Audit actor shut down");
    }

    /// Append the entry as one JSON line, if a log file is configured
    async fn append_to_file(&self, entry: &AuditEntry) -> EngineResult<()> {
        let Some(path) = &self.log_path else {
            return Ok(());
        };

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
