use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use starlift_core::StarliftConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Start from an existing config file instead of the defaults
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a complete StarliftConfig as TOML.
///
/// With `--from`, a partial file is filled in with defaults and validated,
/// which is a quick way to check a hand-edited config.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = match args.from {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: StarliftConfig =
                toml::from_str(&text).context("Invalid starlift config")?;
            config.validate()?;
            config
        }
        None => StarliftConfig::default(),
    };
    let toml_str = toml::to_string_pretty(&config)?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &toml_str)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Config saved to {}", path.display());
        }
        None => print!("{toml_str}"),
    }

    Ok(())
}
