use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array3, ArrayD, IxDyn};
use starlift_core::{StarImage, StarliftError};

#[test]
fn test_new_accepts_mono_and_color() {
    assert!(StarImage::new(Array3::zeros((4, 5, 1))).is_ok());
    let color = StarImage::new(Array3::zeros((4, 5, 3))).unwrap();
    assert_eq!(color.height(), 4);
    assert_eq!(color.width(), 5);
    assert_eq!(color.channels(), 3);
    assert!(color.is_color());
}

#[test]
fn test_new_rejects_bad_channel_count() {
    let err = StarImage::new(Array3::zeros((4, 4, 2))).unwrap_err();
    assert!(matches!(err, StarliftError::InvalidInput(_)));
    assert!(StarImage::new(Array3::zeros((4, 4, 4))).is_err());
}

#[test]
fn test_new_rejects_empty() {
    let err = StarImage::new(Array3::zeros((0, 4, 3))).unwrap_err();
    assert!(matches!(err, StarliftError::InvalidInput(_)));
}

#[test]
fn test_new_rejects_non_finite() {
    let mut data = Array3::<f32>::zeros((3, 3, 1));
    data[[1, 1, 0]] = f32::NAN;
    assert!(matches!(
        StarImage::new(data),
        Err(StarliftError::InvalidInput(_))
    ));
}

#[test]
fn test_from_gray_adds_channel_axis() {
    let image = StarImage::from_gray(Array2::from_elem((3, 7), 0.5)).unwrap();
    assert_eq!(image.data.dim(), (3, 7, 1));
    assert!(!image.is_color());
}

#[test]
fn test_from_dyn_checks_dimensionality() {
    let two = ArrayD::<f32>::zeros(IxDyn(&[4, 4]));
    assert_eq!(StarImage::from_dyn(two).unwrap().channels(), 1);

    let three = ArrayD::<f32>::zeros(IxDyn(&[4, 4, 3]));
    assert_eq!(StarImage::from_dyn(three).unwrap().channels(), 3);

    let four = ArrayD::<f32>::zeros(IxDyn(&[2, 4, 4, 3]));
    assert!(matches!(
        StarImage::from_dyn(four),
        Err(StarliftError::InvalidInput(_))
    ));
}

#[test]
fn test_luminance_weights_channel_two_as_red() {
    let mut data = Array3::<f32>::zeros((1, 3, 3));
    data[[0, 0, 0]] = 1.0;
    data[[0, 1, 1]] = 1.0;
    data[[0, 2, 2]] = 1.0;
    let lum = StarImage::new(data).unwrap().luminance();
    assert_abs_diff_eq!(lum[[0, 0]], 0.0722, epsilon = 1e-6);
    assert_abs_diff_eq!(lum[[0, 1]], 0.7152, epsilon = 1e-6);
    assert_abs_diff_eq!(lum[[0, 2]], 0.2126, epsilon = 1e-6);
}

#[test]
fn test_luminance_of_mono_is_identity() {
    let plane = Array2::from_shape_fn((3, 3), |(r, c)| (r * 3 + c) as f32 / 9.0);
    let image = StarImage::from_gray(plane.clone()).unwrap();
    assert_eq!(image.luminance(), plane);
}

#[test]
fn test_luminance_of_grey_pixel_is_its_value() {
    let image = StarImage::new(Array3::from_elem((2, 2, 3), 0.4)).unwrap();
    for &v in image.luminance().iter() {
        assert_abs_diff_eq!(v, 0.4, epsilon = 1e-6);
    }
}
