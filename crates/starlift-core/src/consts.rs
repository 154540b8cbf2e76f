/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Gaussian kernels extend this many standard deviations from the centre.
pub const KERNEL_TRUNCATE: f32 = 4.0;

/// Small epsilon to avoid division by zero in floating-point ratios.
pub const EPSILON: f32 = 1e-10;

/// Luminance weight per channel index, channels stored blue, green, red
/// (Rec.709 coefficients: 0.0722 B, 0.7152 G, 0.2126 R).
pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.0722, 0.7152, 0.2126];

/// Number of channels in a color image.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Background blur sigma is `background_kernel / BACKGROUND_SIGMA_DIVISOR`.
pub const BACKGROUND_SIGMA_DIVISOR: f32 = 10.0;

/// Sigma of the narrow blur in the star band-pass filter.
pub const DETECTION_SMALL_SIGMA: f32 = 1.0;

/// Sigma of the wide blur in the star band-pass filter.
pub const DETECTION_LARGE_SIGMA: f32 = 4.0;

/// Sigma used to soften the cleaned binary star mask.
pub const MASK_SOFTEN_SIGMA: f32 = 1.5;

/// Connected components smaller than this (pixels) are dropped as noise.
pub const MIN_STAR_AREA: usize = 3;

/// High-pass standard deviation at or below this is treated as a flat field.
pub const DEGENERATE_STDDEV: f64 = 1e-7;

/// Gaussian sigma of the final unsharp mask.
pub const SHARPEN_SIGMA: f32 = 1.2;

/// Weight of the original image in the final unsharp mask.
pub const SHARPEN_ORIGINAL_WEIGHT: f32 = 1.1;

/// Weight of the blurred image subtracted in the final unsharp mask.
pub const SHARPEN_BLUR_WEIGHT: f32 = 0.1;

/// Default background blur scale.
pub const DEFAULT_BACKGROUND_KERNEL: f32 = 75.0;

/// Default high-pass threshold multiplier.
pub const DEFAULT_DETECTION_SIGMA: f32 = 3.0;

/// Default asinh stretch strength.
pub const DEFAULT_STRETCH_STRENGTH: f32 = 10.0;

/// Default background worker-pool size.
pub const DEFAULT_WORKERS: usize = 8;

/// Default background tile edge length.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Default overlap between neighbouring background tiles.
pub const DEFAULT_OVERLAP: usize = 150;

/// Default base star boost.
pub const DEFAULT_ENHANCE_FACTOR: f32 = 1.3;

/// Default extra boost applied to the dimmest stars.
pub const DEFAULT_DIM_STAR_BOOST: f32 = 3.5;

/// Default normalized luminosity above which only the base boost applies.
pub const DEFAULT_BRIGHT_STAR_THRESHOLD: f32 = 0.3;

/// Default display gamma for previews.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Default raw-intensity floor for the star-map gate.
pub const DEFAULT_INTENSITY_FLOOR: f32 = 0.01;

/// Default limit of value / local mean for a detection to count as a star.
pub const DEFAULT_PEAK_RATIO_LIMIT: f32 = 2.5;

/// Default sigma multiplier for hot-pixel suppression.
pub const DEFAULT_HOT_PIXEL_SIGMA: f32 = 8.0;

/// Loaded images whose peak exceeds this are divided by that peak.
pub const PEAK_RENORMALIZE_LIMIT: f32 = 1.5;
