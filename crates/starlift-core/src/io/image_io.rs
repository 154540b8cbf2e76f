use std::path::Path;

use image::{ColorType, DynamicImage, ImageBuffer, ImageFormat, Luma, Pixel, Primitive, Rgb};
use ndarray::{Array2, Array3, Axis};
use tracing::debug;

use crate::consts::{COLOR_CHANNEL_COUNT, PEAK_RENORMALIZE_LIMIT};
use crate::error::{Result, StarliftError};
use crate::frame::StarImage;

/// Load a TIFF or PNG file and normalize it to [0, 1].
///
/// Raw sample values are kept as they are unless the image peak exceeds 1.5,
/// in which case the whole image is divided by its own peak. A dim 16-bit
/// stack therefore fills the full range the same way a float stack does.
/// Colour images are stored blue, green, red.
pub fn load_image(path: &Path) -> Result<StarImage> {
    let img = image::open(path)?;
    let color = img.color();
    debug!(path = %path.display(), ?color, "Loading image");

    let mut data = match color {
        ColorType::Rgb32F | ColorType::Rgba32F => rgb_planes(&img.to_rgb32f()),
        _ if color.has_color() => rgb_planes(&img.to_rgb16()),
        _ => gray_plane(&img),
    };

    let peak = data.iter().copied().fold(0.0f32, f32::max);
    if peak > PEAK_RENORMALIZE_LIMIT {
        data.mapv_inplace(|v| v / peak);
    }

    StarImage::new(data)
}

fn gray_plane(img: &DynamicImage) -> Array3<f32> {
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    Array3::from_shape_fn((h as usize, w as usize, 1), |(row, col, _)| {
        gray.get_pixel(col as u32, row as u32).0[0] as f32
    })
}

fn rgb_planes<T>(rgb: &ImageBuffer<Rgb<T>, Vec<T>>) -> Array3<f32>
where
    Rgb<T>: Pixel<Subpixel = T>,
    T: Primitive + Into<f32>,
{
    let (w, h) = rgb.dimensions();
    Array3::from_shape_fn(
        (h as usize, w as usize, COLOR_CHANNEL_COUNT),
        |(row, col, ch)| {
            let px = rgb.get_pixel(col as u32, row as u32).0;
            // Stored blue, green, red.
            px[COLOR_CHANNEL_COUNT - 1 - ch].into()
        },
    )
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0) as u16
}

/// Quantize to u8 after clipping to [0, 1].
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Interleave an `H×W×C` array as row-major pixels in red, green, blue order.
fn interleave<T>(data: &Array3<f32>, quantize: impl Fn(f32) -> T) -> Vec<T> {
    let (h, w, c) = data.dim();
    let mut pixels = Vec::with_capacity(h * w * c);
    for row in 0..h {
        for col in 0..w {
            for ch in (0..c).rev() {
                pixels.push(quantize(data[[row, col, ch]]));
            }
        }
    }
    pixels
}

fn buffer_error(w: usize, h: usize) -> StarliftError {
    StarliftError::InvalidInput(format!("pixel buffer does not match {w}x{h}"))
}

/// Save as 16-bit TIFF (grayscale or RGB).
pub fn save_tiff(data: &Array3<f32>, path: &Path) -> Result<()> {
    let (h, w, c) = data.dim();
    let pixels = interleave(data, to_u16);
    if c == 1 {
        ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| buffer_error(w, h))?
            .save_with_format(path, ImageFormat::Tiff)?;
    } else {
        ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| buffer_error(w, h))?
            .save_with_format(path, ImageFormat::Tiff)?;
    }
    Ok(())
}

/// Save as 8-bit PNG (grayscale or RGB).
pub fn save_png(data: &Array3<f32>, path: &Path) -> Result<()> {
    let (h, w, c) = data.dim();
    let pixels = interleave(data, to_u8);
    if c == 1 {
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| buffer_error(w, h))?
            .save_with_format(path, ImageFormat::Png)?;
    } else {
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| buffer_error(w, h))?
            .save_with_format(path, ImageFormat::Png)?;
    }
    Ok(())
}

/// Save, choosing format from file extension (TIFF unless `.png`).
pub fn save_image(data: &Array3<f32>, path: &Path) -> Result<()> {
    let (h, w, c) = data.dim();
    if h == 0 || w == 0 || (c != 1 && c != COLOR_CHANNEL_COUNT) {
        return Err(StarliftError::InvalidInput(format!(
            "cannot save a {w}x{h} image with {c} channels"
        )));
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_png(data, path),
        _ => save_tiff(data, path),
    }
}

/// Save a single plane (e.g. the star mask) as a grayscale image.
pub fn save_plane(plane: &Array2<f32>, path: &Path) -> Result<()> {
    save_image(&plane.clone().insert_axis(Axis(2)), path)
}
