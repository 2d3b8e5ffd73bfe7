use chrono::Local;
use profilebot_rust::config::Configuration;
use profilebot_rust::error::UpdateError;
use profilebot_rust::pipeline::{RunContext, UpdatePipeline};
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), UpdateError> {
    init_logging();

    let configuration = Configuration::load()?;
    configuration
        .validate()
        .map_err(UpdateError::Configuration)?;

    let mut context = RunContext::new(Local::now());
    tracing::info!("Starting profile update run {}", context.run_id);

    let mut pipeline = UpdatePipeline::from_configuration(&configuration);
    match pipeline.process(&mut context).await {
        Ok(()) => {
            tracing::info!("Profile update completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Profile update failed: {}", e);
            Err(e)
        }
    }
}
