//! CLI argument parsing with clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// gallery-picker - collect photos and export random selections
///
/// Builds an in-memory collection of image files sorted by capture time,
/// reports the grid layout extent for display, and can export a random
/// non-repeating subset of the collection to a destination folder.
#[derive(Parser, Debug)]
#[command(name = "gallery-picker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Individual image files to import
    #[arg(short = 'i', long, num_args = 1..)]
    pub import: Option<Vec<PathBuf>>,

    /// Folder to scan recursively for image files
    #[arg(short = 'f', long)]
    pub folder: Option<PathBuf>,

    /// Number of records to export at random
    #[arg(short = 'e', long)]
    pub export: Option<usize>,

    /// Destination directory for exported files
    #[arg(short = 'd', long)]
    pub dest: Option<PathBuf>,

    /// Number of grid columns
    #[arg(short = 'c', long)]
    pub columns: Option<usize>,

    /// Rows visible without scrolling
    #[arg(short = 'r', long)]
    pub rows: Option<usize>,

    /// Write a sample configuration file to the given path and exit
    #[arg(long)]
    pub write_sample_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(columns) = self.columns {
            config.grid.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.grid.visible_rows = rows;
        }
        if let Some(export) = self.export {
            config.export_count = Some(export);
        }
        if let Some(ref dest) = self.dest {
            config.export_dir = Some(dest.clone());
        }
        if self.verbose {
            config.verbose = true;
        }
        config
    }

    /// Build a config purely from CLI arguments
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "gallery-picker",
            "--folder",
            "photos",
            "--columns",
            "6",
            "--export",
            "5",
            "--dest",
            "out",
        ]);

        let config = cli.to_config();
        assert_eq!(config.grid.columns, 6);
        assert_eq!(config.grid.visible_rows, 5);
        assert_eq!(config.export_count, Some(5));
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_config_file_values_survive_when_unset() {
        let cli = Cli::parse_from(["gallery-picker", "--rows", "3"]);

        let mut file_config = Config::default();
        file_config.grid.columns = 12;
        file_config.export_count = Some(2);

        let merged = cli.merge_with_config(file_config);
        assert_eq!(merged.grid.columns, 12);
        assert_eq!(merged.grid.visible_rows, 3);
        assert_eq!(merged.export_count, Some(2));
    }
}
