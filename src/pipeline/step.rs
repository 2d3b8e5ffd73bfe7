use crate::error::UpdateError;
use crate::pipeline::context::RunContext;
use async_trait::async_trait;

/// Chain of Responsibility pattern for the update pipeline
#[async_trait]
pub trait PipelineStep: Send + Sync {
    async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError>;
    fn name(&self) -> &'static str;
}
