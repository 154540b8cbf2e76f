use std::f32::consts::PI;

use ndarray::Array2;

/// Raised-cosine weight field used to stitch overlapping background tiles.
///
/// The first and last `min(overlap, len / 2)` rows and columns are tapered by
/// `0.5 * (1 - cos(pi * i / n))`; corners get the product of both tapers and
/// the interior stays at 1.0. `overlap == 0` yields all ones.
pub fn blend_weights(height: usize, width: usize, overlap: usize) -> Array2<f32> {
    let mut weights = Array2::<f32>::ones((height, width));
    if overlap == 0 {
        return weights;
    }

    let row_taper = edge_taper(height, overlap);
    let col_taper = edge_taper(width, overlap);

    for ((row, col), w) in weights.indexed_iter_mut() {
        *w = row_taper[row] * col_taper[col];
    }
    weights
}

/// 1-D taper profile of length `len` for the given overlap.
fn edge_taper(len: usize, overlap: usize) -> Vec<f32> {
    let mut taper = vec![1.0f32; len];
    let n = overlap.min(len / 2);
    for i in 0..n {
        let alpha = 0.5 * (1.0 - (PI * i as f32 / n as f32).cos());
        taper[i] *= alpha;
        taper[len - 1 - i] *= alpha;
    }
    taper
}
