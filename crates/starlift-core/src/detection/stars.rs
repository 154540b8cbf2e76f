use ndarray::{Array2, Zip};
use tracing::debug;

use crate::consts::{
    DETECTION_LARGE_SIGMA, DETECTION_SMALL_SIGMA, EPSILON, MASK_SOFTEN_SIGMA, MIN_STAR_AREA,
};
use crate::error::{Result, StarliftError};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::pipeline::config::StarliftConfig;

use super::components::{filter_small_components, label_components};
use super::morphology::dilate;
use super::threshold::sigma_threshold;

/// Soft star mask shared by every colour channel.
#[derive(Clone, Debug)]
pub struct StarMask {
    /// Per-pixel star weight in [0, 1].
    pub mask: Array2<f32>,
    /// Number of distinct stars (8-connected regions of `mask > 0`).
    pub star_count: usize,
}

/// Detect point sources in a luminance plane.
///
/// Pipeline: band-pass (narrow blur - wide blur) -> sigma threshold ->
/// optional peak-ratio gate -> one dilation -> drop components smaller than
/// [`MIN_STAR_AREA`] -> Gaussian soften -> clip to [0, 1].
///
/// A flat input (zero high-pass variance) yields an all-zero mask.
pub fn detect_stars(luminance: &Array2<f32>, config: &StarliftConfig) -> Result<StarMask> {
    let (h, w) = luminance.dim();
    if h == 0 || w == 0 {
        return Err(StarliftError::InvalidInput(format!(
            "cannot detect stars in an empty {w}x{h} plane"
        )));
    }

    let narrow = gaussian_blur_array(luminance, DETECTION_SMALL_SIGMA);
    let wide = gaussian_blur_array(luminance, DETECTION_LARGE_SIGMA);
    let high_pass = &narrow - &wide;

    let Some(threshold) = sigma_threshold(&high_pass, config.detection_sigma) else {
        debug!("High-pass response is flat; no stars detected");
        return Ok(StarMask {
            mask: Array2::zeros((h, w)),
            star_count: 0,
        });
    };
    let mut binary = high_pass.mapv(|v| v > threshold);

    if let Some(limit) = config.peak_ratio_gate() {
        // The narrow blur doubles as the local mean: isolated spikes sit far
        // above it, PSF-spread stars do not.
        Zip::from(&mut binary)
            .and(luminance)
            .and(&narrow)
            .for_each(|b, &v, &mean| *b &= v / (mean + EPSILON) < limit);
    }

    let dilated = dilate(&binary, config.dilation_kernel);
    let clean = filter_small_components(&dilated, MIN_STAR_AREA);

    let mask = gaussian_blur_array(&clean.mapv(|on| if on { 1.0 } else { 0.0 }), MASK_SOFTEN_SIGMA)
        .mapv(|v| v.clamp(0.0, 1.0));
    let star_count = count_stars(&mask);

    debug!(threshold, star_count, "Star mask computed");
    Ok(StarMask { mask, star_count })
}

/// Count distinct stars as 8-connected regions of non-zero mask pixels.
pub fn count_stars(mask: &Array2<f32>) -> usize {
    label_components(&mask.mapv(|v| v > 0.0)).count()
}
