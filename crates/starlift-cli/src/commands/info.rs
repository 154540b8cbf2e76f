use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use starlift_core::io::image_io::load_image;

#[derive(Args)]
pub struct InfoArgs {
    /// Image file (TIFF or PNG)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let (lo, hi) = image
        .data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let mean = image.data.mean().unwrap_or(0.0);

    println!("File:       {}", args.file.display());
    println!("Dimensions: {}x{}", image.width(), image.height());
    println!(
        "Channels:   {} ({})",
        image.channels(),
        if image.is_color() { "color" } else { "mono" }
    );
    println!("Range:      {:.5} .. {:.5}", lo, hi);
    println!("Mean:       {:.5}", mean);

    Ok(())
}
