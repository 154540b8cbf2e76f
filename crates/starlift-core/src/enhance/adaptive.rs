use ndarray::{Array2, Array3, Axis, Zip};

use crate::consts::EPSILON;
use crate::frame::luminance_of;
use crate::pipeline::config::StarliftConfig;

/// Boost for a normalized star luminosity.
///
/// Below `bright_star_threshold` the boost falls linearly from
/// `dim_star_boost + enhance_factor` (at 0) to `enhance_factor` (at the
/// threshold); above it the boost stays at `enhance_factor`.
pub fn boost_factor(norm: f32, config: &StarliftConfig) -> f32 {
    let knee = config.bright_star_threshold;
    if norm < knee {
        config.dim_star_boost * (1.0 - norm / knee) + config.enhance_factor
    } else {
        config.enhance_factor
    }
}

/// Per-pixel boost map for a star luminosity plane, normalized by its peak.
pub fn adaptive_boost(luminosity: &Array2<f32>, config: &StarliftConfig) -> Array2<f32> {
    let peak = luminosity.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let scale = peak.max(0.0) + EPSILON;
    luminosity.mapv(|l| boost_factor(l / scale, config))
}

/// Boost dim stars more than bright ones without shifting colour.
///
/// Colour pixels are scaled through their share of the pixel luminosity,
/// so channel ratios stay fixed; pixels with (near) zero luminosity stay 0.
/// The result is clipped to [0, 1].
pub fn enhance_stars(star_map: &Array3<f32>, config: &StarliftConfig) -> Array3<f32> {
    let luminosity = luminance_of(star_map.view());
    let boost = adaptive_boost(&luminosity, config);
    let color = star_map.dim().2 > 1;

    let mut enhanced = Array3::<f32>::zeros(star_map.dim());
    for (plane, mut out) in star_map
        .axis_iter(Axis(2))
        .zip(enhanced.axis_iter_mut(Axis(2)))
    {
        Zip::from(&mut out)
            .and(&plane)
            .and(&luminosity)
            .and(&boost)
            .for_each(|o, &s, &lum, &b| {
                let value = if !color {
                    s * b
                } else if lum > EPSILON {
                    let ratio = s / (lum + EPSILON);
                    b * ratio * lum
                } else {
                    0.0
                };
                *o = value.clamp(0.0, 1.0);
            });
    }

    enhanced
}
