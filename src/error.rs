//! Error types for gallery-picker

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for gallery-picker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gallery-picker
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Export destination {path} is not a writable directory: {message}")]
    DestinationUnwritable { path: PathBuf, message: String },

    #[error("Failed to copy {path}: {message}")]
    Copy { path: PathBuf, message: String },

    #[error("Import root {path} is not a readable directory")]
    ImportRootMissing { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    /// Build a decode error from anything displayable
    pub fn decode(path: &Path, err: impl std::fmt::Display) -> Self {
        Error::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
