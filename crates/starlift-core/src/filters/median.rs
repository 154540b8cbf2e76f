use ndarray::Array2;

/// 3x3 median filter with edge replication.
pub fn median_3x3(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));
    let mut window = [0.0f32; 9];

    for row in 0..h {
        for col in 0..w {
            let mut n = 0;
            for dr in -1..=1_isize {
                for dc in -1..=1_isize {
                    let r = (row as isize + dr).clamp(0, h as isize - 1) as usize;
                    let c = (col as isize + dc).clamp(0, w as isize - 1) as usize;
                    window[n] = data[[r, c]];
                    n += 1;
                }
            }
            window.sort_unstable_by(|a, b| a.total_cmp(b));
            result[[row, col]] = window[4];
        }
    }

    result
}
