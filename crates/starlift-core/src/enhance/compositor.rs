use ndarray::{Array2, ArrayView2, Zip};

use crate::error::{Result, StarliftError};

/// Star and starless planes extracted from one channel.
#[derive(Clone, Debug)]
pub struct ChannelLayers {
    /// `max(channel - background, 0) * mask`, optionally gated.
    pub star_map: Array2<f32>,
    /// `channel - star_map`.
    pub starless: Array2<f32>,
}

/// Split one channel into star signal and starless remainder using the
/// shared star mask.
///
/// With `intensity_floor = Some(t)` the mask only applies where the raw
/// channel value exceeds `t`, so near-black detector noise is never treated
/// as star signal. No clipping happens here.
pub fn composite_channel(
    channel: ArrayView2<f32>,
    background: &Array2<f32>,
    mask: &Array2<f32>,
    intensity_floor: Option<f32>,
) -> Result<ChannelLayers> {
    let dim = channel.dim();
    if background.dim() != dim || mask.dim() != dim {
        return Err(StarliftError::InvalidInput(format!(
            "layer shape mismatch: channel {:?}, background {:?}, mask {:?}",
            dim,
            background.dim(),
            mask.dim()
        )));
    }

    let star_map = Zip::from(&channel)
        .and(background)
        .and(mask)
        .map_collect(|&value, &bg, &weight| {
            let gated = match intensity_floor {
                Some(floor) if value <= floor => 0.0,
                _ => weight,
            };
            (value - bg).max(0.0) * gated
        });
    let starless = &channel - &star_map;

    Ok(ChannelLayers { star_map, starless })
}
