use ndarray::{Array2, Array3, Axis, Zip};
use tracing::debug;

use crate::detection::threshold::compute_mean_stddev;
use crate::filters::median::median_3x3;

/// Replace isolated hot pixels with their 3x3 median.
///
/// A pixel is hot when it exceeds its median by more than
/// `sigma_multiplier` standard deviations of the whole `channel - median`
/// difference field. Returns the cleaned plane and the number of pixels
/// replaced.
pub fn suppress_hot_pixels_channel(channel: &Array2<f32>, sigma_multiplier: f32) -> (Array2<f32>, usize) {
    let median = median_3x3(channel);
    let diff = channel - &median;
    let (_, std) = compute_mean_stddev(&diff);
    let limit = (sigma_multiplier as f64 * std) as f32;

    let mut replaced = 0;
    let cleaned = Zip::from(channel)
        .and(&median)
        .and(&diff)
        .map_collect(|&value, &med, &d| {
            if std > 0.0 && d > limit {
                replaced += 1;
                med
            } else {
                value
            }
        });

    (cleaned, replaced)
}

/// Hot-pixel suppression applied to every channel of an `H×W×C` image.
pub fn suppress_hot_pixels(data: &Array3<f32>, sigma_multiplier: f32) -> Array3<f32> {
    let mut cleaned = data.clone();
    let mut total = 0;
    for mut plane in cleaned.axis_iter_mut(Axis(2)) {
        let (fixed, replaced) = suppress_hot_pixels_channel(&plane.to_owned(), sigma_multiplier);
        plane.assign(&fixed);
        total += replaced;
    }
    debug!(replaced = total, "Hot pixels suppressed");
    cleaned
}
