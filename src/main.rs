//! gallery-picker - photo collection and random export tool
//!
//! A CLI front end over the collection core: imports image files or a
//! folder tree, reports the chronological grid layout, and optionally
//! exports a random non-repeating subset to a destination folder.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use gallery_picker::{Cli, Collection, Config, GridPlanner, export_random};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Unified colors and formatting for command line output

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    /// Print a separator line
    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    /// Print an error message
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a key-value pair
    pub fn print_key_value(key: &str, value: &str, value_color: Option<Color>) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = match value_color {
            Some(color) => style(value).with(color),
            None => style(value).bold(),
        };
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print a statistic line
    pub fn print_stat(key: &str, value: &str, color: Color) {
        print_key_value(key, value, Some(color));
    }

    /// Print an in-place progress update
    pub fn print_progress(current: usize, total: usize, message: &str) {
        let line = format!("\r  [{current}/{total}] {message}");
        let _ = stdout().execute(Print(style(line).with(CliTheme::HINT)));
        if current == total {
            let _ = stdout().execute(Print("\n"));
        }
    }

    /// Print a blank line
    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref sample_path) = cli.write_sample_config {
        std::fs::write(sample_path, Config::sample_config())?;
        println!("Sample configuration written to {}", sample_path.display());
        return Ok(());
    }

    let log_path = get_log_path(&cli);
    let _guard = setup_logging(&cli, &log_path)?;

    info!(version = env!("CARGO_PKG_VERSION"), "gallery-picker starting");

    let config = load_config(&cli)?;
    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    run(&cli, &config)?;

    info!(log_file = %log_path.display(), "Run complete");
    Ok(())
}

/// Import, layout report, and optional export
fn run(cli: &Cli, config: &Config) -> Result<()> {
    use cli_output::*;

    let mut collection = Collection::new();
    let mut sink = |current: usize, total: usize, message: &str| {
        print_progress(current, total, message);
    };

    let mut total_failed = 0usize;

    if let Some(ref paths) = cli.import {
        let report = collection.import_files(paths, &mut sink);
        total_failed += report.failed();
        report_failures(&report.failures);
    }

    if let Some(ref folder) = cli.folder {
        let report = collection.import_folder(folder, &mut sink)?;
        total_failed += report.failed();
        report_failures(&report.failures);
    }

    print_separator();
    print_key_value("Collection", &collection.summary(), None);

    let planner = config.grid;
    print_grid_extent(&planner, collection.len());

    if total_failed > 0 {
        print_stat("Failed to decode", &total_failed.to_string(), CliTheme::ERROR);
    }

    if let Some(count) = config.export_count {
        let dest = config
            .export_dir
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--export requires a destination (--dest)"))?;

        let report = export_random(&mut collection, count, &dest)?;

        print_separator();
        print_stat("Exported", &report.exported.len().to_string(), CliTheme::SUCCESS);
        if !report.failures.is_empty() {
            print_stat("Copy failures", &report.failures.len().to_string(), CliTheme::WARNING);
            for failure in &report.failures {
                print_key_value(
                    &failure.path.display().to_string(),
                    &failure.message,
                    Some(CliTheme::ERROR),
                );
            }
        }
        print_key_value("Remaining", &collection.summary(), None);
    }

    print_blank();
    Ok(())
}

/// Print the grid geometry the current collection needs
fn print_grid_extent(planner: &GridPlanner, n: usize) {
    use cli_output::*;

    print_key_value(
        "Grid",
        &format!("{} columns x {} rows", planner.columns, planner.rows(n)),
        Some(CliTheme::ACCENT),
    );
    print_key_value(
        "Canvas",
        &format!("{}x{} px", planner.viewport_width(), planner.content_height(n)),
        Some(CliTheme::HINT),
    );
}

/// Print per-file decode failures
fn report_failures(failures: &[gallery_picker::collection::ImportFailure]) {
    use cli_output::*;

    if failures.is_empty() {
        return;
    }
    print_error(&format!("{} file(s) could not be decoded", failures.len()));
    for failure in failures {
        print_key_value(
            &failure.path.display().to_string(),
            &failure.message,
            Some(CliTheme::ERROR),
        );
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    if cli.import.is_none() && cli.folder.is_none() {
        anyhow::bail!("Nothing to do: pass --import <FILES> and/or --folder <DIR>");
    }

    if config.grid.columns == 0 {
        anyhow::bail!("Grid column count must be at least 1");
    }

    Ok(config)
}

/// Determine the log file path next to the executable
fn get_log_path(cli: &Cli) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    if let Some(name) = cli.config.as_ref().and_then(|p| p.file_stem()).and_then(|s| s.to_str()) {
        log_dir.join(format!("{}_{}.log", name, timestamp))
    } else {
        log_dir.join(format!("Run_{}.log", timestamp))
    }
}

/// Setup logging (file + console)
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(Some(guard))
}
