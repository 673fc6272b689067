//! Configuration types for gallery-picker

use crate::error::{Error, Result};
use crate::grid::GridPlanner;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for gallery-picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grid geometry used for layout planning
    #[serde(default)]
    pub grid: GridPlanner,

    /// Default number of records to export when none is given on the CLI
    #[serde(default)]
    pub export_count: Option<usize>,

    /// Default export destination directory
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Verbose output
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridPlanner::default(),
            export_count: None,
            export_dir: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# gallery-picker configuration file
# This file uses TOML format (https://toml.io)

# Grid geometry for the thumbnail layout.
# columns: fixed number of grid columns
# cell_width / cell_height: cell size including padding, in pixels
# visible_rows: rows shown without scrolling (viewport only; every
# record is laid out, scrolling reveals the rest)
[grid]
columns = 9
cell_width = 136
cell_height = 136
visible_rows = 5

# Default number of records for --export when the flag has no value
# export_count = 10

# Default destination directory for exports
# export_dir = "D:/Exports"

# Verbose output - show detailed processing information
verbose = false
"#
        .to_string()
    }
}
