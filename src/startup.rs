use crate::commands::{execute, parse_command, CommandContext};
use crate::components::audit::AuditActor;
use crate::components::scheduling::Scheduling;
use crate::components::ComponentManager;
use crate::config::Config;
use crate::error::{component_error, Error};
use crate::shutdown;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the engine and serve console commands until EOF or a signal
pub async fn start_engine(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Initialize the audit actor
    let (mut audit_actor, audit_handle) = {
        let config_read = config.read().await;
        info!("Using timezone {}", config_read.timezone);
        AuditActor::new(&config_read)
    };

    // Spawn audit actor task
    tokio::spawn(async move {
        audit_actor.run().await;
    });

    // Register components
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(Scheduling::new());
    let component_manager = Arc::new(component_manager);

    component_manager.init_all(audit_handle.clone()).await?;

    let handle = component_manager
        .scheduling_handle()
        .await
        .ok_or_else(|| component_error("Scheduling component failed to start"))?;

    let ctx = CommandContext::new(Arc::clone(&config), handle);

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    let shutdown_audit = audit_handle.clone();
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components, shutdown_audit).await;
    });

    info!("Ready for commands, type 'help' for usage");

    // Wait for either the console to end or a shutdown signal
    tokio::select! {
        result = run_console(ctx) => {
            info!("Console input closed");
            shutdown::shutdown_all(&component_manager, &audit_handle).await;
            result
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down engine...");
            Ok(())
        }
    }
}

/// Read commands line by line from stdin and print their output
async fn run_console(ctx: CommandContext) -> miette::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.map_err(Error::from)? {
        let output = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => execute(&ctx, command).await,
            Err(e) => Err(e),
        };

        let text = match output {
            Ok(text) => text,
            Err(e) => {
                error!("Command failed: {}", e);
                format!("error: {}", e)
            }
        };

        stdout
            .write_all(format!("{}\n", text).as_bytes())
            .await
            .map_err(Error::from)?;
        stdout.flush().await.map_err(Error::from)?;
    }

    Ok(())
}
