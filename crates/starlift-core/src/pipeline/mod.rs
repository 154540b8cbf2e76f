pub mod config;
mod orchestrator;
pub mod types;

pub use orchestrator::{run, run_reported};
pub use types::{NoOpReporter, PipelineOutput, PipelineStage, ProgressReporter, ProgressSpan};
