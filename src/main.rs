use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use wrap_snake::game::GameConfig;
use wrap_snake::logging;
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Terminal columns per cell
    #[arg(long)]
    cell_width: Option<u16>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(cell_width) = self.cell_width {
            config.cell_width = cell_width;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let level = logging::parse_level(&cli.log_level)?;
        logging::init_file_logger(path, level)?;
    }

    let config = cli.game_config()?;
    info!(
        "Starting with grid {}, cell width {}, tick {}ms",
        config.grid_size, config.cell_width, config.tick_ms
    );

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["wrap_snake", "--grid-size", "12", "--tick-ms", "150"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_ms, 150);
        assert_eq!(config.cell_width, 2);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["wrap_snake", "--grid-size", "3"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("wrap_snake_cli_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "grid_size": 30, "tick_ms": 300 }"#).unwrap();

        let cli = Cli::parse_from([
            "wrap_snake",
            "--config",
            path.to_str().unwrap(),
            "--tick-ms",
            "80",
        ]);
        let config = cli.game_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_ms, 80);
    }
}
