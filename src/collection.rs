//! The ordered set of imported image records
//!
//! Handles batch import from explicit file lists or a recursive folder
//! walk, with per-item failure isolation: one undecodable file never
//! aborts the batch. After every import the collection is re-sorted into
//! chronological order.

use crate::error::{Error, Result};
use crate::record::{ImageRecord, chronological_order};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions accepted for import, matched case-insensitively
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check whether a path passes the image-file predicate
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|e| *e == lower)
        })
        .unwrap_or(false)
}

/// Receives `(current, total, message)` updates during batch operations
///
/// The collection reports once per discovered file during a folder scan
/// and once per processed file during the decode phase, with `current`
/// increasing until it reaches `total`.
pub trait ProgressSink {
    fn report(&mut self, current: usize, total: usize, message: &str);
}

impl<F: FnMut(usize, usize, &str)> ProgressSink for F {
    fn report(&mut self, current: usize, total: usize, message: &str) {
        self(current, total, message)
    }
}

/// A sink that discards all progress updates
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _current: usize, _total: usize, _message: &str) {}
}

/// One file skipped during a batch import
#[derive(Debug, Clone)]
pub struct ImportFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch import, for caller reporting
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Number of records appended to the collection
    pub imported: usize,
    /// Files skipped via per-item isolation
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// Count of files that failed to decode
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// The ordered collection of imported records
///
/// Owns its records exclusively; mutated only by import (append), clear,
/// and export removal. Always chronologically sorted after an import.
#[derive(Debug, Default)]
pub struct Collection {
    records: Vec<ImageRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record count
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in chronological order
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Mutable access, used by a view layer to derive detail views
    pub fn records_mut(&mut self) -> &mut [ImageRecord] {
        &mut self.records
    }

    /// Remove every record unconditionally
    pub fn clear(&mut self) {
        info!(count = self.records.len(), "Clearing collection");
        self.records.clear();
    }

    /// Model-owned text for the caller's info display
    pub fn summary(&self) -> String {
        match self.records.len() {
            0 => "No images loaded".to_string(),
            n => format!("{} images loaded", n),
        }
    }

    /// Import an explicit list of paths
    ///
    /// Paths failing the image predicate are ignored outright. Each
    /// remaining file is decoded individually; a `Decode` failure lands in
    /// the report and the batch continues. The collection is re-sorted
    /// once at the end of the batch.
    pub fn import_files<P, S>(&mut self, paths: &[P], sink: &mut S) -> ImportReport
    where
        P: AsRef<Path>,
        S: ProgressSink,
    {
        let candidates: Vec<&Path> = paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| is_image_file(p))
            .collect();

        let total = candidates.len();
        let mut report = ImportReport::default();

        for (i, path) in candidates.iter().enumerate() {
            match ImageRecord::open(path) {
                Ok(record) => {
                    debug!(?path, "Imported image");
                    self.records.push(record);
                    report.imported += 1;
                }
                Err(e) => {
                    warn!(?path, error = %e, "Skipping undecodable file");
                    report.failures.push(ImportFailure {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }
            sink.report(i + 1, total, &path.display().to_string());
        }

        self.sort_chronologically();
        info!(
            imported = report.imported,
            failed = report.failed(),
            total = self.records.len(),
            "Import batch complete"
        );
        report
    }

    /// Import every image file under `root`, recursively
    ///
    /// A missing or unreadable root is fatal before any per-item work.
    /// Discovery progress is reported once per found image file, then the
    /// list is handed to the decode phase of `import_files`.
    pub fn import_folder<S: ProgressSink>(
        &mut self,
        root: &Path,
        sink: &mut S,
    ) -> Result<ImportReport> {
        if !root.is_dir() {
            return Err(Error::ImportRootMissing {
                path: root.to_path_buf(),
            });
        }

        let mut discovered: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_image_file(path) {
                discovered.push(path.to_path_buf());
                sink.report(discovered.len(), discovered.len(), "Scanning folder");
            }
        }

        info!(root = %root.display(), count = discovered.len(), "Folder scan complete");
        Ok(self.import_files(&discovered, sink))
    }

    /// Stable chronological re-sort; ties between undated records keep
    /// their insertion order
    fn sort_chronologically(&mut self) {
        self.records.sort_by(chronological_order);
    }

    /// Remove the records at `indices`, returning them in index order
    ///
    /// Indices refer to the current chronological order and must be in
    /// range. Used by the exporter after it has decided which copies
    /// succeeded.
    pub(crate) fn take_indices(&mut self, indices: &[usize]) -> Vec<ImageRecord> {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        // Remove back-to-front so earlier indices stay valid
        let mut taken: Vec<ImageRecord> = sorted
            .iter()
            .rev()
            .map(|&i| self.records.remove(i))
            .collect();
        taken.reverse();
        taken
    }
}
