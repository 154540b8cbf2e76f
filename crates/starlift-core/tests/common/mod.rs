#![allow(dead_code)]

use ndarray::{Array2, Array3};
use starlift_core::StarliftConfig;

/// Flat `h x w` plane.
pub fn flat(h: usize, w: usize, value: f32) -> Array2<f32> {
    Array2::from_elem((h, w), value)
}

/// Deterministic ramp in [0, 1).
pub fn ramp(h: usize, w: usize) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(r, c)| (r * w + c) as f32 / (h * w) as f32)
}

/// Zero plane with a `size x size` square of `value` whose top-left corner is
/// at (row, col).
pub fn square_star(h: usize, w: usize, row: usize, col: usize, size: usize, value: f32) -> Array2<f32> {
    let mut data = Array2::<f32>::zeros((h, w));
    for r in row..row + size {
        for c in col..col + size {
            data[[r, c]] = value;
        }
    }
    data
}

/// Add a circular Gaussian star centred at (cy, cx).
pub fn add_gaussian_star(data: &mut Array2<f32>, cy: f32, cx: f32, sigma: f32, amplitude: f32) {
    let s2 = 2.0 * sigma * sigma;
    for ((r, c), v) in data.indexed_iter_mut() {
        let dy = r as f32 - cy;
        let dx = c as f32 - cx;
        *v += amplitude * (-(dy * dy + dx * dx) / s2).exp();
    }
}

/// Flat sky with three well separated Gaussian stars.
pub fn star_field(h: usize, w: usize, sky: f32) -> Array2<f32> {
    let mut data = flat(h, w, sky);
    add_gaussian_star(&mut data, h as f32 * 0.25, w as f32 * 0.25, 1.5, 0.8);
    add_gaussian_star(&mut data, h as f32 * 0.25, w as f32 * 0.75, 1.5, 0.3);
    add_gaussian_star(&mut data, h as f32 * 0.75, w as f32 * 0.5, 1.5, 0.6);
    data
}

/// Stack one plane into a colour image with per-channel gains (B, G, R).
pub fn tinted(plane: &Array2<f32>, gains: [f32; 3]) -> Array3<f32> {
    let (h, w) = plane.dim();
    Array3::from_shape_fn((h, w, 3), |(r, c, ch)| (plane[[r, c]] * gains[ch]).clamp(0.0, 1.0))
}

/// Small, fast configuration for tests.
pub fn test_config() -> StarliftConfig {
    StarliftConfig {
        background_kernel: 20.0,
        workers: 2,
        block_size: 32,
        overlap: 8,
        ..StarliftConfig::default()
    }
}
