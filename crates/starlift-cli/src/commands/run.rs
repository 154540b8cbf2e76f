use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use starlift_core::filters::levels::gamma_correct;
use starlift_core::io::image_io::{load_image, save_image, save_plane, save_png};
use starlift_core::{run_reported, DilationKernel, PipelineOutput, ProgressReporter, StarliftConfig};
use tracing::info;

use crate::summary::print_run_summary;

/// File name used when no output path is given.
const DEFAULT_OUTPUT_NAME: &str = "final_star_enhanced_rgb16.tif";

#[derive(Args)]
pub struct RunArgs {
    /// Input image (TIFF or PNG)
    pub file: PathBuf,

    /// Config file (TOML); command-line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Background blur scale (sigma = value / 10)
    #[arg(long)]
    pub background_kernel: Option<f32>,

    /// Detection threshold in standard deviations
    #[arg(long)]
    pub sigma: Option<f32>,

    /// Asinh stretch strength for the star layer
    #[arg(long)]
    pub strength: Option<f32>,

    /// Background worker threads (0 = one per core)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Background tile size in pixels
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Background tile overlap in pixels
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Base star boost
    #[arg(long)]
    pub enhance_factor: Option<f32>,

    /// Extra boost for the faintest stars
    #[arg(long)]
    pub dim_boost: Option<f32>,

    /// Normalized brightness above which only the base boost applies
    #[arg(long)]
    pub bright_threshold: Option<f32>,

    /// Preview gamma
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Dilate detections with a 3x3 square instead of a radius-1 disk
    #[arg(long)]
    pub square_kernel: bool,

    /// Skip hot-pixel suppression
    #[arg(long)]
    pub no_hot_pixels: bool,

    /// Output file path (default: next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a gamma-corrected 8-bit PNG preview
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Directory for background, star map, starless and mask layers
    #[arg(long)]
    pub save_layers: Option<PathBuf>,
}

/// Drives an indicatif bar from pipeline progress.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn report(&self, fraction: f32, message: &str) -> bool {
        self.bar.set_message(message.to_string());
        self.bar.set_position((fraction * 100.0).round() as u64);
        true
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate()?;

    let output = args.output.clone().unwrap_or_else(|| default_output(&args.file));
    print_run_summary(&args.file, &output, &config);

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    info!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "Loaded input"
    );

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:28} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar };

    // The bar never asks to stop, so any error here is a real failure.
    let result = run_reported(&image, &config, &reporter)
        .inspect_err(|_| reporter.bar.abandon_with_message("Failed"))
        .context("Star enhancement failed")?;
    reporter.bar.finish_with_message("Done");
    info!(stars = result.star_count, "Enhancement complete");

    save_image(&result.image, &output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("\nDetected {} stars", result.star_count);
    println!("Output saved to {}", output.display());

    if let Some(ref preview) = args.preview {
        save_png(&gamma_correct(&result.image, config.gamma), preview)
            .with_context(|| format!("Failed to save preview {}", preview.display()))?;
        println!("Preview saved to {}", preview.display());
    }

    if let Some(ref dir) = args.save_layers {
        save_layers(&result, dir)?;
        println!("Layers saved to {}", dir.display());
    }

    Ok(())
}

fn build_config(args: &RunArgs) -> Result<StarliftConfig> {
    let mut config = if let Some(ref path) = args.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).context("Invalid starlift config")?
    } else {
        StarliftConfig::default()
    };

    if let Some(v) = args.background_kernel {
        config.background_kernel = v;
    }
    if let Some(v) = args.sigma {
        config.detection_sigma = v;
    }
    if let Some(v) = args.strength {
        config.stretch_strength = v;
    }
    if let Some(v) = args.workers {
        config.workers = v;
    }
    if let Some(v) = args.block_size {
        config.block_size = v;
    }
    if let Some(v) = args.overlap {
        config.overlap = v;
    }
    if let Some(v) = args.enhance_factor {
        config.enhance_factor = v;
    }
    if let Some(v) = args.dim_boost {
        config.dim_star_boost = v;
    }
    if let Some(v) = args.bright_threshold {
        config.bright_star_threshold = v;
    }
    if let Some(v) = args.gamma {
        config.gamma = v;
    }
    if args.square_kernel {
        config.dilation_kernel = DilationKernel::Square;
    }
    if args.no_hot_pixels {
        config.hot_pixel_sigma = 0.0;
    }

    Ok(config)
}

fn default_output(input: &Path) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(DEFAULT_OUTPUT_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME))
}

fn save_layers(result: &PipelineOutput, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    save_image(&result.background, &dir.join("background.tif"))?;
    save_image(&result.star_map, &dir.join("star_map.tif"))?;
    save_image(&result.starless, &dir.join("starless.tif"))?;
    save_plane(&result.star_mask, &dir.join("star_mask.tif"))?;
    info!(dir = %dir.display(), "Saved intermediate layers");
    Ok(())
}
