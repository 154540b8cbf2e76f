use ndarray::Array2;

use crate::consts::DEGENERATE_STDDEV;

/// Population mean and standard deviation, accumulated in f64.
pub fn compute_mean_stddev(data: &Array2<f32>) -> (f64, f64) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    let n = data.len() as f64;
    let (sum, sum_sq) = data.iter().fold((0.0f64, 0.0f64), |(s, sq), &v| {
        let v = v as f64;
        (s + v, sq + v * v)
    });
    let mean = sum / n;
    // Clamp guards against tiny negative variance from cancellation.
    let var = (sum_sq / n - mean * mean).max(0.0);
    (mean, var.sqrt())
}

/// Detection threshold `sigma * std` for a zero-mean band-pass response.
///
/// Returns `None` when the response is flat, so callers can skip detection
/// instead of thresholding noise-free data at zero.
pub fn sigma_threshold(response: &Array2<f32>, sigma: f32) -> Option<f32> {
    let (_, std) = compute_mean_stddev(response);
    (std > DEGENERATE_STDDEV).then(|| (sigma as f64 * std) as f32)
}
