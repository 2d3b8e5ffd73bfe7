use crate::config::Configuration;
use crate::error::UpdateError;
use crate::pipeline::context::RunContext;
use crate::pipeline::step::PipelineStep;
use crate::pipeline::steps::{
    ExtractPalette, MaterializeImage, RenderSwatches, SelectImage, UpdateDocument,
};

/// A pipeline that runs one profile update through a chain of steps
pub struct UpdatePipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl UpdatePipeline {
    pub fn builder() -> UpdatePipelineBuilder {
        UpdatePipelineBuilder { steps: Vec::new() }
    }

    /// Wires the standard steps in dependency order.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::builder()
            .add_step(Box::new(SelectImage::from_configuration(configuration)))
            .add_step(Box::new(MaterializeImage::from_configuration(configuration)))
            .add_step(Box::new(ExtractPalette::from_configuration(configuration)))
            .add_step(Box::new(RenderSwatches::from_configuration(configuration)))
            .add_step(Box::new(UpdateDocument::from_configuration(configuration)))
            .build()
    }

    pub async fn process(&mut self, context: &mut RunContext) -> Result<(), UpdateError> {
        for step in &mut self.steps {
            tracing::debug!("Processing step: {}", step.name());
            step.process(context).await?;
        }
        Ok(())
    }
}

pub struct UpdatePipelineBuilder {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl UpdatePipelineBuilder {
    pub fn add_step(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> UpdatePipeline {
        UpdatePipeline { steps: self.steps }
    }
}
