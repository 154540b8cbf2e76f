use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use ndarray::{s, Array2, Zip};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::consts::BACKGROUND_SIGMA_DIVISOR;
use crate::error::{Result, StarliftError};
use crate::filters::gaussian_blur::gaussian_blur_view;
use crate::pipeline::config::StarliftConfig;
use crate::pipeline::types::{NoOpReporter, PipelineStage, ProgressReporter, ProgressSpan};

use super::blend::blend_weights;
use super::tiles::{tile_grid, Tile};

/// One smoothed tile plus its blend weights, produced by a worker.
struct TileEstimate {
    tile: Tile,
    smoothed: Array2<f32>,
    weights: Array2<f32>,
}

/// Tiled background estimator backed by a bounded worker pool.
///
/// Workers only smooth tiles; every `+=` into the output accumulators happens
/// on the thread that called [`BackgroundEstimator::estimate`], in whatever
/// order results arrive.
pub struct BackgroundEstimator<'a> {
    config: &'a StarliftConfig,
    pool: ThreadPool,
}

impl<'a> BackgroundEstimator<'a> {
    pub fn new(config: &'a StarliftConfig) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("starlift-bg-{i}"))
            .build()
            .map_err(|e| StarliftError::WorkerPool(e.to_string()))?;
        Ok(Self { config, pool })
    }

    pub fn estimate(&self, channel: &Array2<f32>) -> Result<Array2<f32>> {
        self.estimate_reported(channel, &NoOpReporter, ProgressSpan::FULL)
    }

    /// Estimate the background, reporting once per accumulated tile.
    ///
    /// Returns [`StarliftError::Cancelled`] as soon as the reporter asks to
    /// stop; tiles that have not started are skipped and any results still
    /// in flight are dropped.
    pub fn estimate_reported(
        &self,
        channel: &Array2<f32>,
        reporter: &dyn ProgressReporter,
        span: ProgressSpan,
    ) -> Result<Array2<f32>> {
        let (h, w) = channel.dim();
        if h == 0 || w == 0 {
            return Err(StarliftError::InvalidInput(format!(
                "cannot estimate background of an empty {w}x{h} channel"
            )));
        }

        if !reporter.report(span.at(0.0), &PipelineStage::Background.to_string()) {
            return Err(StarliftError::Cancelled);
        }

        let started = Instant::now();
        let tiles = tile_grid(h, w, self.config.block_size, self.config.overlap);
        let total = tiles.len();
        let sigma = self.config.background_kernel / BACKGROUND_SIGMA_DIVISOR;
        let overlap = self.config.overlap;

        let mut merged = TileAccumulator::new(h, w);
        let cancelled = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<TileEstimate>();

        let outcome = self.pool.in_place_scope(|scope| {
            for &tile in &tiles {
                let tx = tx.clone();
                let cancelled = &cancelled;
                scope.spawn(move |_| {
                    if cancelled.load(Ordering::Relaxed) {
                        return;
                    }
                    // The receiver may be gone after cancellation.
                    let _ = tx.send(smooth_tile(channel, tile, sigma, overlap));
                });
            }
            drop(tx);

            for (done, estimate) in rx.iter().enumerate() {
                merged.add(&estimate);
                let message = format!("Background tile {}/{}", done + 1, total);
                if !reporter.report(span.at((done + 1) as f32 / total as f32), &message) {
                    cancelled.store(true, Ordering::Relaxed);
                    return Err(StarliftError::Cancelled);
                }
            }
            Ok(())
        });
        outcome?;

        debug!(
            tiles = total,
            sigma,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Background estimated"
        );

        Ok(merged.finish())
    }
}

/// Estimate the smooth background of a single channel.
pub fn estimate_background(channel: &Array2<f32>, config: &StarliftConfig) -> Result<Array2<f32>> {
    BackgroundEstimator::new(config)?.estimate(channel)
}

/// [`estimate_background`] with per-tile progress and cancellation.
pub fn estimate_background_reported(
    channel: &Array2<f32>,
    config: &StarliftConfig,
    reporter: &dyn ProgressReporter,
    span: ProgressSpan,
) -> Result<Array2<f32>> {
    BackgroundEstimator::new(config)?.estimate_reported(channel, reporter, span)
}

fn smooth_tile(channel: &Array2<f32>, tile: Tile, sigma: f32, overlap: usize) -> TileEstimate {
    let block = channel.slice(s![tile.y0..tile.y1, tile.x0..tile.x1]);
    TileEstimate {
        tile,
        smoothed: gaussian_blur_view(block, sigma),
        weights: blend_weights(tile.height(), tile.width(), overlap),
    }
}

/// Running sums for the tile merge.
///
/// The raised-cosine taper is zero on every tile's outermost ring, so the
/// image's own border collects no weight at all. Those pixels fall back to
/// the plain mean of the tile estimates that cover them.
struct TileAccumulator {
    weighted: Array2<f32>,
    weight_sum: Array2<f32>,
    plain: Array2<f32>,
    coverage: Array2<f32>,
}

impl TileAccumulator {
    fn new(h: usize, w: usize) -> Self {
        Self {
            weighted: Array2::zeros((h, w)),
            weight_sum: Array2::zeros((h, w)),
            plain: Array2::zeros((h, w)),
            coverage: Array2::zeros((h, w)),
        }
    }

    fn add(&mut self, estimate: &TileEstimate) {
        let t = estimate.tile;
        Zip::from(self.weighted.slice_mut(s![t.y0..t.y1, t.x0..t.x1]))
            .and(self.weight_sum.slice_mut(s![t.y0..t.y1, t.x0..t.x1]))
            .and(self.plain.slice_mut(s![t.y0..t.y1, t.x0..t.x1]))
            .and(self.coverage.slice_mut(s![t.y0..t.y1, t.x0..t.x1]))
            .and(&estimate.smoothed)
            .and(&estimate.weights)
            .for_each(|acc, wsum, plain, count, &value, &weight| {
                *acc += value * weight;
                *wsum += weight;
                *plain += value;
                *count += 1.0;
            });
    }

    fn finish(self) -> Array2<f32> {
        Zip::from(&self.weighted)
            .and(&self.weight_sum)
            .and(&self.plain)
            .and(&self.coverage)
            .map_collect(|&acc, &wsum, &plain, &count| {
                if wsum > 0.0 {
                    acc / wsum
                } else if count > 0.0 {
                    plain / count
                } else {
                    0.0
                }
            })
    }
}
