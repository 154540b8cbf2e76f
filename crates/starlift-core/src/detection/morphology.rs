use ndarray::Array2;

use crate::pipeline::config::DilationKernel;

/// Neighbour offsets `(dr, dc)` of a radius-1 structuring element.
fn offsets(kernel: DilationKernel) -> &'static [(i32, i32)] {
    const DISK: [(i32, i32); 5] = [(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)];
    const SQUARE: [(i32, i32); 9] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 0),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    match kernel {
        DilationKernel::Disk => &DISK,
        DilationKernel::Square => &SQUARE,
    }
}

/// Binary dilation (one iteration): a pixel becomes true if any pixel under
/// the structuring element is true. Out-of-bounds pixels count as false.
pub fn dilate(mask: &Array2<bool>, kernel: DilationKernel) -> Array2<bool> {
    let (h, w) = mask.dim();
    let element = offsets(kernel);

    Array2::from_shape_fn((h, w), |(row, col)| {
        element.iter().any(|&(dr, dc)| {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            nr >= 0
                && nr < h as i32
                && nc >= 0
                && nc < w as i32
                && mask[[nr as usize, nc as usize]]
        })
    })
}
