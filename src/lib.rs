//! gallery-picker - collect photos, lay them out, export random picks
//!
//! This library provides the core of a photo collection tool:
//! - Batch import of image files with per-item failure isolation
//! - EXIF capture metadata extraction (timestamp, camera make/model)
//! - Bounded thumbnail and detail-view derivation
//! - Chronological ordering with an explicit policy for undated records
//! - Fixed-column grid layout planning for a scrolling view
//! - Random sampling-without-replacement export to a destination folder

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod metadata;
pub mod record;
pub mod thumbnail;

pub use cli::Cli;
pub use collection::{Collection, ImportReport, NoProgress, ProgressSink};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{ExportReport, export_random, export_random_with};
pub use grid::{GridPlanner, GridPosition};
pub use metadata::CaptureMetadata;
pub use record::ImageRecord;
