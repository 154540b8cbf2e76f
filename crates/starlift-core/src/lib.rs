pub mod background;
pub mod consts;
pub mod detection;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod preprocess;

pub use error::{Result, StarliftError};
pub use frame::StarImage;
pub use pipeline::config::{DilationKernel, StarliftConfig};
pub use pipeline::{run, run_reported, PipelineOutput, PipelineStage, ProgressReporter};
