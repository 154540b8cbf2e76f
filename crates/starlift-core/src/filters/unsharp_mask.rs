use ndarray::{Array3, Axis, Zip};

use crate::filters::gaussian_blur::gaussian_blur_view;

/// Fixed-weight unsharp mask: `clip(orig * original_weight - blur * blur_weight, 0, 1)`.
///
/// Each channel is blurred independently with `sigma`. With
/// `original_weight - blur_weight == 1` flat regions keep their brightness.
pub fn weighted_unsharp_mask(
    data: &Array3<f32>,
    sigma: f32,
    original_weight: f32,
    blur_weight: f32,
) -> Array3<f32> {
    let mut result = Array3::<f32>::zeros(data.dim());

    for (plane, mut out) in data.axis_iter(Axis(2)).zip(result.axis_iter_mut(Axis(2))) {
        let blurred = gaussian_blur_view(plane, sigma);
        Zip::from(&mut out)
            .and(&plane)
            .and(&blurred)
            .for_each(|o, &orig, &blur| {
                *o = (orig * original_weight - blur * blur_weight).clamp(0.0, 1.0);
            });
    }

    result
}
