use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Smallest grid that still contains the starting cell (5, 5)
pub const MIN_GRID_SIZE: usize = 6;
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs to name the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Terminal columns used to draw one cell
    pub cell_width: u16,
    /// Time between two ticks, in milliseconds
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_width: 2,
            tick_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    #[cfg(test)]
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Read a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid game configuration")
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size),
            "grid_size must be between {} and {}, got {}",
            MIN_GRID_SIZE,
            MAX_GRID_SIZE,
            self.grid_size
        );
        ensure!(
            (1..=4).contains(&self.cell_width),
            "cell_width must be between 1 and 4, got {}",
            self.cell_width
        );
        ensure!(
            (20..=2000).contains(&self.tick_ms),
            "tick_ms must be between 20 and 2000, got {}",
            self.tick_ms
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
