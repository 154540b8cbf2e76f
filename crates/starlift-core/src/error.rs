use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarliftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Processing cancelled by user")]
    Cancelled,

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl StarliftError {
    /// True when the run was stopped through the progress callback rather
    /// than by a processing failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, StarliftError>;
