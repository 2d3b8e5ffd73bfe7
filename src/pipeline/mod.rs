pub mod context;
pub mod pipeline;
pub mod step;
pub mod steps;

pub use context::RunContext;
pub use pipeline::{UpdatePipeline, UpdatePipelineBuilder};
pub use step::PipelineStep;
