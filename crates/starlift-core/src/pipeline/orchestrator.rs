use ndarray::{stack, Array2, Array3, ArrayView2, Axis};
use tracing::{debug, info};

use crate::background::estimator::BackgroundEstimator;
use crate::detection::stars::{detect_stars, StarMask};
use crate::enhance::adaptive::enhance_stars;
use crate::enhance::compositor::composite_channel;
use crate::enhance::finish::{recombine_stretched, sharpen};
use crate::error::{Result, StarliftError};
use crate::frame::StarImage;
use crate::preprocess::suppress_hot_pixels;

use super::config::StarliftConfig;
use super::types::{NoOpReporter, PipelineOutput, PipelineStage, ProgressReporter, ProgressSpan};

const HOT_PIXELS_DONE: f32 = 0.05;
const DETECTION_DONE: f32 = 0.15;
const BACKGROUND_DONE: f32 = 0.85;
const ENHANCEMENT_DONE: f32 = 0.9;
const STRETCH_DONE: f32 = 0.95;

/// Run the full star enhancement on one image.
pub fn run(image: &StarImage, config: &StarliftConfig) -> Result<PipelineOutput> {
    run_reported(image, config, &NoOpReporter)
}

/// Run the full star enhancement with progress reporting and cancellation.
///
/// Two phases: the shared star mask is computed once from luminance, then
/// every channel is separated against that same mask. The reporter is
/// called after each stage and each background tile; a `false` reply
/// aborts with [`StarliftError::Cancelled`].
pub fn run_reported(
    image: &StarImage,
    config: &StarliftConfig,
    reporter: &dyn ProgressReporter,
) -> Result<PipelineOutput> {
    config.validate()?;
    let (h, w, c) = image.data.dim();
    info!(width = w, height = h, channels = c, "Enhancing star field");

    let working = match config.hot_pixel_gate() {
        Some(sigma) => StarImage::new(suppress_hot_pixels(&image.data, sigma))?,
        None => image.clone(),
    };
    checkpoint(reporter, HOT_PIXELS_DONE, PipelineStage::HotPixels)?;

    // Phase 1: one mask for all channels.
    let luminance = working.luminance();
    let StarMask { mask, star_count } = detect_stars(&luminance, config)?;
    info!(star_count, "Stars detected");
    checkpoint(reporter, DETECTION_DONE, PipelineStage::Detection)?;

    // Phase 2: per-channel background and separation.
    let estimator = BackgroundEstimator::new(config)?;
    let background_span = ProgressSpan::new(DETECTION_DONE, BACKGROUND_DONE);
    let mut backgrounds = Vec::with_capacity(c);
    let mut star_maps = Vec::with_capacity(c);
    let mut starless_planes = Vec::with_capacity(c);

    for ch in 0..c {
        let channel = working.channel(ch).to_owned();
        let background =
            estimator.estimate_reported(&channel, reporter, background_span.slice(ch, c))?;
        let layers = composite_channel(channel.view(), &background, &mask, config.intensity_gate())?;
        debug!(channel = ch, "Channel separated");

        backgrounds.push(background);
        star_maps.push(layers.star_map);
        starless_planes.push(layers.starless);
    }
    checkpoint(reporter, BACKGROUND_DONE, PipelineStage::Compositing)?;

    let star_map = stack_planes(&star_maps)?;
    let starless = stack_planes(&starless_planes)?;

    let enhanced = enhance_stars(&star_map, config);
    checkpoint(reporter, ENHANCEMENT_DONE, PipelineStage::Enhancement)?;

    let combined = recombine_stretched(&enhanced, &starless, config.stretch_strength)?;
    checkpoint(reporter, STRETCH_DONE, PipelineStage::Stretch)?;

    let result = sharpen(&combined);
    checkpoint(reporter, 1.0, PipelineStage::Sharpening)?;

    info!(star_count, "Star enhancement complete");
    Ok(PipelineOutput {
        image: result,
        star_count,
        star_mask: mask,
        background: clip_unit(stack_planes(&backgrounds)?),
        star_map: clip_unit(star_map),
        starless: clip_unit(starless),
    })
}

fn checkpoint(reporter: &dyn ProgressReporter, fraction: f32, stage: PipelineStage) -> Result<()> {
    if reporter.report(fraction, &stage.to_string()) {
        Ok(())
    } else {
        info!(%stage, "Cancelled by user");
        Err(StarliftError::Cancelled)
    }
}

fn stack_planes(planes: &[Array2<f32>]) -> Result<Array3<f32>> {
    let views: Vec<ArrayView2<f32>> = planes.iter().map(|p| p.view()).collect();
    stack(Axis(2), &views).map_err(|e| StarliftError::InvalidInput(format!("channel stack: {e}")))
}

fn clip_unit(data: Array3<f32>) -> Array3<f32> {
    data.mapv_into(|v| v.clamp(0.0, 1.0))
}
