use ndarray::{Array3, Zip};

use crate::consts::{SHARPEN_BLUR_WEIGHT, SHARPEN_ORIGINAL_WEIGHT, SHARPEN_SIGMA};
use crate::error::{Result, StarliftError};
use crate::filters::stretch::asinh_stretch;
use crate::filters::unsharp_mask::weighted_unsharp_mask;

/// Stretch the enhanced star layer and add it back onto the starless image.
///
/// Only the star layer is stretched, so background and nebula brightness in
/// `starless` pass through unchanged. The sum is clipped to [0, 1].
pub fn recombine_stretched(
    enhanced: &Array3<f32>,
    starless: &Array3<f32>,
    strength: f32,
) -> Result<Array3<f32>> {
    if enhanced.dim() != starless.dim() {
        return Err(StarliftError::InvalidInput(format!(
            "star layer {:?} does not match starless image {:?}",
            enhanced.dim(),
            starless.dim()
        )));
    }

    let stretched = asinh_stretch(enhanced, strength);
    Ok(Zip::from(starless)
        .and(&stretched)
        .map_collect(|&base, &stars| (base + stars).clamp(0.0, 1.0)))
}

/// Final brightness-neutral unsharp mask.
pub fn sharpen(combined: &Array3<f32>) -> Array3<f32> {
    weighted_unsharp_mask(
        combined,
        SHARPEN_SIGMA,
        SHARPEN_ORIGINAL_WEIGHT,
        SHARPEN_BLUR_WEIGHT,
    )
}

/// [`recombine_stretched`] followed by [`sharpen`].
pub fn stretch_and_sharpen(
    enhanced: &Array3<f32>,
    starless: &Array3<f32>,
    strength: f32,
) -> Result<Array3<f32>> {
    let combined = recombine_stretched(enhanced, starless, strength)?;
    Ok(sharpen(&combined))
}
