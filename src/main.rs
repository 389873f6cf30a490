use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use button_snake::game::GameConfig;
use button_snake::modes::PlayMode;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "button_snake")]
#[command(version, about = "Two-button Snake on an emulated 128x32 panel")]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds per tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Fixed random seed instead of system entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the snake lit on a dark background
    #[arg(long)]
    no_invert: bool,

    /// Write logs to this file (RUST_LOG filters, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_invert {
            config.inverted = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the panel, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut play_mode = PlayMode::new(config);
    let result = play_mode.run().await;
    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "halted");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "button_snake",
            "--width",
            "64",
            "--tick-ms",
            "80",
            "--seed",
            "5",
            "--no-invert",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.board_width, 64);
        assert_eq!(config.board_height, 32);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.seed, Some(5));
        assert!(!config.inverted);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["button_snake", "--tick-ms", "0"]);
        assert!(cli.game_config().is_err());
    }
}
