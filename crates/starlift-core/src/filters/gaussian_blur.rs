use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::consts::{KERNEL_TRUNCATE, PARALLEL_PIXEL_THRESHOLD};

/// Isotropic Gaussian blur using separable 1D convolution.
///
/// Samples outside the array are mirrored about the edge (`d c b a | a b c d`)
/// and the kernel is truncated at four standard deviations, the same
/// conventions as `scipy.ndimage.gaussian_filter`. A non-positive `sigma`
/// returns an unmodified copy.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    gaussian_blur_view(data.view(), sigma)
}

/// Same as [`gaussian_blur_array`] for a borrowed sub-view, e.g. a tile.
pub fn gaussian_blur_view(data: ArrayView2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 || data.is_empty() {
        return data.to_owned();
    }
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve_axis(data, &kernel, Axis(1));
    convolve_axis(row_pass.view(), &kernel, Axis(0))
}

/// Normalized Gaussian kernel with radius `round(4 * sigma)`.
pub fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * KERNEL_TRUNCATE + 0.5) as usize;
    let s2 = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Convolve every line along `axis` with `kernel`, mirroring at the borders.
fn convolve_axis(data: ArrayView2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;
    let len = data.len_of(axis) as isize;

    let sample = |row: usize, col: usize| -> f32 {
        let centre = (if axis == Axis(1) { col } else { row }) as isize;
        kernel
            .iter()
            .enumerate()
            .map(|(ki, &kv)| {
                let src = reflect_index(centre + ki as isize - radius, len);
                let v = if axis == Axis(1) {
                    data[[row, src]]
                } else {
                    data[[src, col]]
                };
                v * kv
            })
            .sum()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                for (col, v) in out.iter_mut().enumerate() {
                    *v = sample(row, col);
                }
            });
    } else {
        for ((row, col), v) in result.indexed_iter_mut() {
            *v = sample(row, col);
        }
    }
    result
}

/// Map an out-of-range index back into `0..len` by half-sample reflection.
fn reflect_index(index: isize, len: isize) -> usize {
    let period = 2 * len;
    let m = index.rem_euclid(period);
    (if m < len { m } else { period - 1 - m }) as usize
}
