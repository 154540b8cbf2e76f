use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND_KERNEL, DEFAULT_BLOCK_SIZE, DEFAULT_BRIGHT_STAR_THRESHOLD,
    DEFAULT_DETECTION_SIGMA, DEFAULT_DIM_STAR_BOOST, DEFAULT_ENHANCE_FACTOR, DEFAULT_GAMMA,
    DEFAULT_HOT_PIXEL_SIGMA, DEFAULT_INTENSITY_FLOOR, DEFAULT_OVERLAP, DEFAULT_PEAK_RATIO_LIMIT,
    DEFAULT_STRETCH_STRENGTH, DEFAULT_WORKERS,
};
use crate::error::{Result, StarliftError};

/// Structuring element used to grow detections before component filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DilationKernel {
    /// Radius-1 disk (plus-shaped, 5 pixels).
    #[default]
    Disk,
    /// Full 3x3 square.
    Square,
}

impl std::fmt::Display for DilationKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disk => write!(f, "Disk (r=1)"),
            Self::Square => write!(f, "Square (3x3)"),
        }
    }
}

/// Parameters for one enhancement run. Read-only for the whole run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StarliftConfig {
    /// Background blur scale; the Gaussian sigma is this value / 10.
    #[serde(default = "default_background_kernel")]
    pub background_kernel: f32,
    /// High-pass threshold in standard deviations.
    #[serde(default = "default_detection_sigma")]
    pub detection_sigma: f32,
    /// Strength of the asinh star stretch.
    #[serde(default = "default_stretch_strength")]
    pub stretch_strength: f32,
    /// Background worker threads (0 = one per core).
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Background tile edge length in pixels.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Overlap between neighbouring tiles in pixels.
    #[serde(default = "default_overlap")]
    pub overlap: usize,
    /// Boost applied to every star.
    #[serde(default = "default_enhance_factor")]
    pub enhance_factor: f32,
    /// Extra boost for the faintest stars.
    #[serde(default = "default_dim_star_boost")]
    pub dim_star_boost: f32,
    /// Normalized luminosity where the extra boost reaches zero.
    #[serde(default = "default_bright_star_threshold")]
    pub bright_star_threshold: f32,
    /// Display gamma for previews; not used by the transform.
    #[serde(default = "default_gamma")]
    pub gamma: f32,
    #[serde(default)]
    pub dilation_kernel: DilationKernel,
    /// Star mask only applies where the raw channel exceeds this value.
    /// Zero or less disables the gate.
    #[serde(default = "default_intensity_floor")]
    pub intensity_floor: f32,
    /// Detections brighter than this multiple of their local mean are
    /// treated as hot pixels. Zero or less disables the gate.
    #[serde(default = "default_peak_ratio_limit")]
    pub peak_ratio_limit: f32,
    /// Sigma multiplier for hot-pixel suppression before detection.
    /// Zero or less disables suppression.
    #[serde(default = "default_hot_pixel_sigma")]
    pub hot_pixel_sigma: f32,
}

fn default_background_kernel() -> f32 {
    DEFAULT_BACKGROUND_KERNEL
}
fn default_detection_sigma() -> f32 {
    DEFAULT_DETECTION_SIGMA
}
fn default_stretch_strength() -> f32 {
    DEFAULT_STRETCH_STRENGTH
}
fn default_workers() -> usize {
    DEFAULT_WORKERS
}
fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}
fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}
fn default_enhance_factor() -> f32 {
    DEFAULT_ENHANCE_FACTOR
}
fn default_dim_star_boost() -> f32 {
    DEFAULT_DIM_STAR_BOOST
}
fn default_bright_star_threshold() -> f32 {
    DEFAULT_BRIGHT_STAR_THRESHOLD
}
fn default_gamma() -> f32 {
    DEFAULT_GAMMA
}
fn default_intensity_floor() -> f32 {
    DEFAULT_INTENSITY_FLOOR
}
fn default_peak_ratio_limit() -> f32 {
    DEFAULT_PEAK_RATIO_LIMIT
}
fn default_hot_pixel_sigma() -> f32 {
    DEFAULT_HOT_PIXEL_SIGMA
}

impl Default for StarliftConfig {
    fn default() -> Self {
        Self {
            background_kernel: DEFAULT_BACKGROUND_KERNEL,
            detection_sigma: DEFAULT_DETECTION_SIGMA,
            stretch_strength: DEFAULT_STRETCH_STRENGTH,
            workers: DEFAULT_WORKERS,
            block_size: DEFAULT_BLOCK_SIZE,
            overlap: DEFAULT_OVERLAP,
            enhance_factor: DEFAULT_ENHANCE_FACTOR,
            dim_star_boost: DEFAULT_DIM_STAR_BOOST,
            bright_star_threshold: DEFAULT_BRIGHT_STAR_THRESHOLD,
            gamma: DEFAULT_GAMMA,
            dilation_kernel: DilationKernel::default(),
            intensity_floor: DEFAULT_INTENSITY_FLOOR,
            peak_ratio_limit: DEFAULT_PEAK_RATIO_LIMIT,
            hot_pixel_sigma: DEFAULT_HOT_PIXEL_SIGMA,
        }
    }
}

impl StarliftConfig {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(invalid("block_size must be positive"));
        }
        if self.overlap >= self.block_size {
            return Err(invalid(format!(
                "overlap ({}) must be smaller than block_size ({})",
                self.overlap, self.block_size
            )));
        }

        let positive = [
            ("background_kernel", self.background_kernel),
            ("stretch_strength", self.stretch_strength),
            ("bright_star_threshold", self.bright_star_threshold),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be a positive number, got {value}")));
            }
        }

        let finite = [
            ("detection_sigma", self.detection_sigma),
            ("enhance_factor", self.enhance_factor),
            ("dim_star_boost", self.dim_star_boost),
            ("gamma", self.gamma),
            ("intensity_floor", self.intensity_floor),
            ("peak_ratio_limit", self.peak_ratio_limit),
            ("hot_pixel_sigma", self.hot_pixel_sigma),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        Ok(())
    }

    /// Compositor intensity gate, if enabled.
    pub fn intensity_gate(&self) -> Option<f32> {
        enabled(self.intensity_floor)
    }

    /// Detector peak-ratio gate, if enabled.
    pub fn peak_ratio_gate(&self) -> Option<f32> {
        enabled(self.peak_ratio_limit)
    }

    /// Hot-pixel suppression multiplier, if enabled.
    pub fn hot_pixel_gate(&self) -> Option<f32> {
        enabled(self.hot_pixel_sigma)
    }
}

fn enabled(value: f32) -> Option<f32> {
    (value > 0.0).then_some(value)
}

fn invalid(message: impl Into<String>) -> StarliftError {
    StarliftError::InvalidConfig(message.into())
}
