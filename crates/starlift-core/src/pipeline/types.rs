use ndarray::{Array2, Array3};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    HotPixels,
    Detection,
    Background,
    Compositing,
    Enhancement,
    Stretch,
    Sharpening,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HotPixels => write!(f, "Removing hot pixels"),
            Self::Detection => write!(f, "Detecting stars"),
            Self::Background => write!(f, "Estimating background"),
            Self::Compositing => write!(f, "Separating stars"),
            Self::Enhancement => write!(f, "Enhancing stars"),
            Self::Stretch => write!(f, "Stretching"),
            Self::Sharpening => write!(f, "Sharpening"),
        }
    }
}

/// Result of a pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Final enhanced image, same shape as the input, clipped to [0, 1].
    pub image: Array3<f32>,
    /// Number of distinct stars in the shared mask.
    pub star_count: usize,
    /// Shared soft star mask computed from luminance.
    pub star_mask: Array2<f32>,
    /// Per-channel background, clipped to [0, 1].
    pub background: Array3<f32>,
    /// Per-channel star signal, clipped to [0, 1].
    pub star_map: Array3<f32>,
    /// Per-channel starless image, clipped to [0, 1].
    pub starless: Array3<f32>,
}

/// Cooperative progress reporting for the pipeline.
///
/// Called on the thread that invoked the pipeline, with a monotonically
/// non-decreasing fraction in [0, 1]. Returning `false` requests
/// cancellation.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, _fraction: f32, _message: &str) -> bool {
        true
    }
}

impl<F> ProgressReporter for F
where
    F: Fn(f32, &str) -> bool + Send + Sync,
{
    fn report(&self, fraction: f32, message: &str) -> bool {
        self(fraction, message)
    }
}

/// No-op progress reporter, used when no callback is supplied.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Sub-range of the overall progress bar assigned to one piece of work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSpan {
    pub start: f32,
    pub end: f32,
}

impl ProgressSpan {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Overall fraction for a local fraction `t` in [0, 1].
    ///
    /// Never exceeds `end`, so consecutive spans stay monotonic.
    pub fn at(&self, t: f32) -> f32 {
        (self.start + (self.end - self.start) * t.clamp(0.0, 1.0)).min(self.end)
    }

    /// The `index`-th of `count` equal slices of this span.
    pub fn slice(&self, index: usize, count: usize) -> Self {
        let count = count.max(1) as f32;
        Self::new(
            self.at(index as f32 / count),
            self.at((index + 1) as f32 / count),
        )
    }
}
