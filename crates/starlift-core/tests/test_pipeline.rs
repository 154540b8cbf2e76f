mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ndarray::{Array3, Axis};
use starlift_core::{run, run_reported, StarImage, StarliftConfig, StarliftError};

use common::{flat, star_field, test_config, tinted};

fn no_hot_pixels() -> StarliftConfig {
    StarliftConfig {
        hot_pixel_sigma: 0.0,
        ..test_config()
    }
}

#[test]
fn test_black_image_stays_black() {
    for channels in [1, 3] {
        let image = StarImage::new(Array3::zeros((40, 40, channels))).unwrap();
        let out = run(&image, &test_config()).unwrap();
        assert_eq!(out.star_count, 0);
        assert!(out.image.iter().all(|v| v.is_finite()));
        assert!(out.image.iter().all(|&v| v.abs() < 1e-6));
        assert!(out.background.iter().all(|&v| v.abs() < 1e-6));
        assert!(out.star_map.iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_output_shape_matches_input() {
    let mono = StarImage::from_gray(star_field(48, 64, 0.1)).unwrap();
    let out = run(&mono, &no_hot_pixels()).unwrap();
    assert_eq!(out.image.dim(), (48, 64, 1));
    assert_eq!(out.star_mask.dim(), (48, 64));

    let color = StarImage::new(tinted(&star_field(48, 64, 0.1), [0.8, 1.0, 0.9])).unwrap();
    let out = run(&color, &no_hot_pixels()).unwrap();
    assert_eq!(out.image.dim(), (48, 64, 3));
    assert_eq!(out.background.dim(), (48, 64, 3));
    assert_eq!(out.star_map.dim(), (48, 64, 3));
    assert_eq!(out.starless.dim(), (48, 64, 3));
}

#[test]
fn test_layers_are_clipped() {
    let color = StarImage::new(tinted(&star_field(64, 64, 0.2), [0.7, 1.0, 1.2])).unwrap();
    let out = run(&color, &test_config()).unwrap();
    for layer in [&out.image, &out.background, &out.star_map, &out.starless] {
        assert!(layer.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
    assert!(out.star_mask.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn test_star_count_for_synthetic_field() {
    let image = StarImage::from_gray(star_field(64, 64, 0.1)).unwrap();
    let out = run(&image, &no_hot_pixels()).unwrap();
    assert_eq!(out.star_count, 3);
}

#[test]
fn test_mask_from_luminance_applies_to_every_channel() {
    // A star present only in the red channel (index 2) is detected through
    // luminance, and no channel carries star signal outside the shared mask.
    let sky = flat(64, 64, 0.1);
    let mut red = sky.clone();
    common::add_gaussian_star(&mut red, 32.0, 32.0, 1.5, 0.8);
    let mut data = Array3::<f32>::zeros((64, 64, 3));
    data.index_axis_mut(Axis(2), 0).assign(&sky);
    data.index_axis_mut(Axis(2), 1).assign(&sky);
    data.index_axis_mut(Axis(2), 2).assign(&red);

    let out = run(&StarImage::new(data).unwrap(), &no_hot_pixels()).unwrap();
    assert_eq!(out.star_count, 1);
    assert!(out.star_mask[[32, 32]] > 0.5);
    assert!(out.star_map[[32, 32, 2]] > 0.1);

    for ch in 0..3 {
        let plane = out.star_map.index_axis(Axis(2), ch);
        for ((r, c), &v) in plane.indexed_iter() {
            if v > 0.0 {
                assert!(out.star_mask[[r, c]] > 0.0, "signal outside mask at ({r},{c})");
            }
        }
    }
}

#[test]
fn test_stars_get_brighter() {
    let plane = star_field(64, 64, 0.1);
    let image = StarImage::from_gray(plane.clone()).unwrap();
    let out = run(&image, &no_hot_pixels()).unwrap();
    // The faintest star (amplitude 0.3 at row 16, col 48) is lifted.
    assert!(out.image[[16, 48, 0]] > plane[[16, 48]]);
    // Sky far from any star is left close to its level.
    assert!((out.image[[40, 8, 0]] - plane[[40, 8]]).abs() < 0.05);
}

#[test]
fn test_cancel_on_first_report() {
    let image = StarImage::from_gray(star_field(64, 64, 0.1)).unwrap();
    let calls = AtomicUsize::new(0);
    let reporter = |_fraction: f32, _message: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        false
    };
    let err = run_reported(&image, &test_config(), &reporter).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cancel_during_background() {
    let image = StarImage::from_gray(star_field(96, 96, 0.1)).unwrap();
    let reporter = |_fraction: f32, message: &str| !message.starts_with("Background tile");
    let err = run_reported(&image, &test_config(), &reporter).unwrap_err();
    assert!(matches!(err, StarliftError::Cancelled));
}

#[test]
fn test_progress_is_monotonic_and_completes() {
    let image = StarImage::new(tinted(&star_field(64, 64, 0.1), [1.0, 1.0, 1.0])).unwrap();
    let seen = Mutex::new(Vec::new());
    let reporter = |fraction: f32, _message: &str| {
        seen.lock().unwrap().push(fraction);
        true
    };
    run_reported(&image, &test_config(), &reporter).unwrap();

    let seen = seen.into_inner().unwrap();
    assert!(seen.len() > 5);
    assert!(seen.windows(2).all(|p| p[1] >= p[0]), "progress went backwards: {seen:?}");
    assert!(seen.iter().all(|&f| (0.0..=1.0).contains(&f)));
    assert_eq!(seen[seen.len() - 1], 1.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let image = StarImage::from_gray(flat(16, 16, 0.1)).unwrap();
    let config = StarliftConfig {
        block_size: 32,
        overlap: 40,
        ..StarliftConfig::default()
    };
    let err = run(&image, &config).unwrap_err();
    assert!(matches!(err, StarliftError::InvalidConfig(_)));
}
