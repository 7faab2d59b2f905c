use property_scheduler::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting property scheduler");

    // Load configuration
    let config = startup::load_config().await?;

    // Serve the engine
    startup::start_engine(config).await
}
