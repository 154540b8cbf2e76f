use ndarray::{Array, ArrayBase, Data, Dimension};

/// Linearly map the array's own `[min, max]` onto `[0, 1]`.
///
/// A constant array maps to all zeros.
pub fn rescale_to_unit_range<S, D>(data: &ArrayBase<S, D>) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let (lo, hi) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 {
        return data.mapv(|_| 0.0);
    }
    data.mapv(|v| ((v - lo) / range).clamp(0.0, 1.0))
}

/// Inverse hyperbolic sine stretch: `rescale_to_unit_range(asinh(data * strength))`.
///
/// Monotone in the input for a fixed strength, so pixel ordering survives.
pub fn asinh_stretch<S, D>(data: &ArrayBase<S, D>, strength: f32) -> Array<f32, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let curved = data.mapv(|v| (v * strength).asinh());
    rescale_to_unit_range(&curved)
}
