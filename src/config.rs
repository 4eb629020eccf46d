//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.
//!
//! ```toml
//! [grid]
//! preset = "custom"
//! rows = 4
//! cols = 12
//! holes = ["k-4-1", "k-4-12"]
//!
//! [editor]
//! keycodes = ["KC_A", "KC_B", "XXXXXXX"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::branding::APP_DATA_DIR;
use crate::models::{KeyGrid, PositionId};
use crate::services::option_lists::default_keycode_palette;

/// Which key grid to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridPreset {
    /// The 70-key Redox board
    #[default]
    Redox,
    /// `rows` x `cols` with `holes` removed
    Custom,
}

/// Position space configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid preset
    pub preset: GridPreset,
    /// Row count of a custom grid
    pub rows: u8,
    /// Column count of a custom grid
    pub cols: u8,
    /// Positions (`k-<row>-<col>`) without a switch in a custom grid
    pub holes: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            preset: GridPreset::Redox,
            rows: 5,
            cols: 17,
            holes: Vec::new(),
        }
    }
}

impl GridConfig {
    /// Builds the key grid described by this configuration.
    pub fn to_key_grid(&self) -> Result<KeyGrid> {
        match self.preset {
            GridPreset::Redox => Ok(KeyGrid::redox()),
            GridPreset::Custom => {
                let holes = self
                    .holes
                    .iter()
                    .map(|hole| {
                        PositionId::from(hole.as_str())
                            .grid_coordinates()
                            .with_context(|| format!("Invalid hole position '{hole}', expected k-<row>-<col>"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(KeyGrid::new(self.rows, self.cols).with_holes(holes))
            }
        }
    }
}

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Keycodes offered in every key's option list, after the layer references
    pub keycodes: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            keycodes: default_keycode_palette(),
        }
    }
}

/// Application configuration.
///
/// # Validation
///
/// - a custom grid must have at least one row and one column
/// - holes must be `k-<row>-<col>` ids
/// - palette keycodes must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Position space
    pub grid: GridConfig,
    /// Editor preferences
    pub editor: EditorConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/RedoxLayoutEditor/`
    /// - macOS: `~/Library/Application Support/RedoxLayoutEditor/`
    /// - Windows: `%APPDATA%\RedoxLayoutEditor\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file, defaulting if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using atomic write.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.grid.preset == GridPreset::Custom && (self.grid.rows == 0 || self.grid.cols == 0) {
            anyhow::bail!(
                "Custom grid must have at least one row and one column (got {}x{})",
                self.grid.rows,
                self.grid.cols
            );
        }

        self.grid.to_key_grid()?;

        if let Some(index) = self.editor.keycodes.iter().position(String::is_empty) {
            anyhow::bail!("Keycode palette entry {index} is empty");
        }

        Ok(())
    }
}
