use ndarray::Array3;

/// Apply gamma correction: output = input^(1/gamma).
///
/// Used for display previews only; the enhancement transform never calls it.
pub fn gamma_correct(data: &Array3<f32>, gamma: f32) -> Array3<f32> {
    if gamma <= 0.0 {
        return data.mapv(|v| v.clamp(0.0, 1.0));
    }
    let inv_gamma = 1.0 / gamma;
    data.mapv(|v| v.clamp(0.0, 1.0).powf(inv_gamma))
}
