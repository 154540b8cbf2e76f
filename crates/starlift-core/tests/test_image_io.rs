use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array3};
use starlift_core::io::image_io::{load_image, save_image, save_plane};
use starlift_core::StarliftError;

fn gradient_color(h: usize, w: usize) -> Array3<f32> {
    Array3::from_shape_fn((h, w, 3), |(r, c, ch)| match ch {
        0 => 0.1,
        1 => r as f32 / (h - 1) as f32,
        _ => c as f32 / (w - 1) as f32,
    })
}

#[test]
fn test_tiff_round_trip_color_keeps_channel_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.tif");
    let data = gradient_color(8, 12);

    save_image(&data, &path).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.data.dim(), (8, 12, 3));
    for (a, b) in loaded.data.iter().zip(data.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-4);
    }
}

#[test]
fn test_tiff_round_trip_gray() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.tiff");
    let plane = Array2::from_shape_fn((6, 5), |(r, c)| (r * 5 + c) as f32 / 29.0);

    save_plane(&plane, &path).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.channels(), 1);
    for (a, b) in loaded.data.iter().zip(plane.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-4);
    }
}

#[test]
fn test_png_round_trip_is_8_bit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.png");
    let data = gradient_color(4, 4);

    save_image(&data, &path).unwrap();
    let loaded = load_image(&path).unwrap();

    assert_eq!(loaded.data.dim(), (4, 4, 3));
    for (a, b) in loaded.data.iter().zip(data.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1.0 / 255.0 + 1e-4);
    }
}

#[test]
fn test_red_pixel_lands_in_last_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("red.png");
    let red = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]));
    red.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_abs_diff_eq!(loaded.data[[0, 0, 2]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.data[[0, 0, 0]], 0.0, epsilon = 1e-6);
}

#[test]
fn test_save_clips_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clipped.tif");
    let mut data = Array3::<f32>::from_elem((2, 2, 1), 0.5);
    data[[0, 0, 0]] = 3.0;
    data[[1, 1, 0]] = -1.0;

    save_image(&data, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_abs_diff_eq!(loaded.data[[0, 0, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.data[[1, 1, 0]], 0.0, epsilon = 1e-6);
}

#[test]
fn test_dim_stack_is_scaled_by_its_own_peak() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dim.tif");
    let raw: Vec<u16> = vec![0, 5_000, 10_000, 20_000];
    image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(2, 2, raw)
        .unwrap()
        .save(&path)
        .unwrap();

    let loaded = load_image(&path).unwrap();
    assert_abs_diff_eq!(loaded.data[[1, 1, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.data[[0, 1, 0]], 0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(loaded.data[[1, 0, 0]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_black_image_stays_black_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("black.tif");
    save_image(&Array3::zeros((3, 3, 3)), &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert!(loaded.data.iter().all(|&v| v == 0.0));
}

#[test]
fn test_save_rejects_bad_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tif");
    let err = save_image(&Array3::zeros((4, 4, 2)), &path).unwrap_err();
    assert!(matches!(err, StarliftError::InvalidInput(_)));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("missing.tif")).is_err());
}
