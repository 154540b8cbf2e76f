use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix2, Ix3, Zip};

use crate::consts::{COLOR_CHANNEL_COUNT, LUMINANCE_WEIGHTS};
use crate::error::{Result, StarliftError};

/// A single already-stacked image.
///
/// Pixel values are f32, nominally in [0.0, 1.0]. Shape is
/// `(height, width, channels)` with one channel for grayscale data and three
/// for colour, stored in blue, green, red order.
#[derive(Clone, Debug)]
pub struct StarImage {
    /// Pixel data, shape = (height, width, channels)
    pub data: Array3<f32>,
}

impl StarImage {
    /// Wrap a validated `(height, width, channels)` array.
    pub fn new(data: Array3<f32>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if h == 0 || w == 0 {
            return Err(StarliftError::InvalidInput(format!(
                "empty image ({w}x{h})"
            )));
        }
        if c != 1 && c != COLOR_CHANNEL_COUNT {
            return Err(StarliftError::InvalidInput(format!(
                "expected 1 or {COLOR_CHANNEL_COUNT} channels, got {c}"
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(StarliftError::InvalidInput(
                "image contains non-finite values".into(),
            ));
        }
        Ok(Self { data })
    }

    /// Grayscale image, stored internally as a single channel.
    pub fn from_gray(data: Array2<f32>) -> Result<Self> {
        Self::new(data.insert_axis(Axis(2)))
    }

    /// Accept either an `H×W` or an `H×W×C` array.
    pub fn from_dyn(data: ArrayD<f32>) -> Result<Self> {
        match data.ndim() {
            2 => {
                let gray = data
                    .into_dimensionality::<Ix2>()
                    .map_err(|e| StarliftError::InvalidInput(e.to_string()))?;
                Self::from_gray(gray)
            }
            3 => {
                let full = data
                    .into_dimensionality::<Ix3>()
                    .map_err(|e| StarliftError::InvalidInput(e.to_string()))?;
                Self::new(full)
            }
            n => Err(StarliftError::InvalidInput(format!(
                "expected a 2-D or 3-D array, got {n} dimensions"
            ))),
        }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn is_color(&self) -> bool {
        self.channels() == COLOR_CHANNEL_COUNT
    }

    pub fn channel(&self, index: usize) -> ArrayView2<'_, f32> {
        self.data.index_axis(Axis(2), index)
    }

    /// Perceptual luminance plane of this image.
    pub fn luminance(&self) -> Array2<f32> {
        luminance_of(self.data.view())
    }
}

/// Weighted luminance of an `H×W×C` array.
///
/// Single-channel input returns the channel itself.
pub fn luminance_of(data: ArrayView3<f32>) -> Array2<f32> {
    let (h, w, c) = data.dim();
    if c != COLOR_CHANNEL_COUNT {
        return data.index_axis(Axis(2), 0).to_owned();
    }

    let mut lum = Array2::<f32>::zeros((h, w));
    for (ch, &weight) in LUMINANCE_WEIGHTS.iter().enumerate() {
        Zip::from(&mut lum)
            .and(data.index_axis(Axis(2), ch))
            .for_each(|l, &v| *l += weight * v);
    }
    lum
}
