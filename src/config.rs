//! Configuration file handling for rfview.
//!
//! Loads settings from `~/.config/rfview/rfview.toml` or `./rfview.toml`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Theme;
use crate::engine::DEFAULT_GA_THRESHOLD;

/// Application configuration loaded from rfview.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threshold applied at startup and by the reset action.
    pub threshold: f64,
    /// Display colors.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_GA_THRESHOLD,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if not found.
    ///
    /// Search order:
    /// 1. `./rfview.toml` (current directory)
    /// 2. `~/.config/rfview/rfview.toml` (XDG config)
    ///
    /// Returns `(config, was_file_loaded)` tuple.
    pub fn load() -> (Self, bool) {
        // Try current directory first
        if let Some(config) = Self::load_from_path(&PathBuf::from("rfview.toml")) {
            return (config, true);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("rfview").join("rfview.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return (config, true);
            }
        }

        // Fall back to defaults
        (Self::default(), false)
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &PathBuf) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }
}
