//! The in-memory entity for one imported image
//!
//! A record owns its source path, whatever capture metadata the file
//! carried, and the derived display representations. Construction is
//! atomic: if the image cannot be decoded no record exists, while missing
//! metadata merely leaves the optional fields unset.

use crate::error::Result;
use crate::metadata::{self, CaptureMetadata};
use crate::thumbnail::{self, FULL_VIEW_BOUND, THUMBNAIL_BOUND};
use chrono::NaiveDateTime;
use image::DynamicImage;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One imported image with its metadata and derived views
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Path of the original file; never changes after construction
    source_path: PathBuf,
    /// Capture timestamp from EXIF, absent when the file carries none
    pub capture_timestamp: Option<NaiveDateTime>,
    /// Camera manufacturer, if recorded
    pub device_make: Option<String>,
    /// Camera model, if recorded
    pub device_model: Option<String>,
    /// Grid thumbnail, rendered eagerly at import
    thumbnail: DynamicImage,
    /// Detail view, rendered on first request
    full_view: Option<DynamicImage>,
}

impl ImageRecord {
    /// Construct a record by decoding the file at `path`
    ///
    /// Decoding failure aborts construction. Metadata extraction is
    /// best-effort: a file without a readable tag block still yields a
    /// record with the optional fields unset.
    pub fn open(path: &Path) -> Result<Self> {
        let image = thumbnail::decode_image(path)?;

        let metadata = match metadata::read_capture_metadata(path) {
            Ok(m) => m,
            Err(e) => {
                debug!(?path, error = %e, "No usable capture metadata");
                CaptureMetadata::default()
            }
        };

        let thumb = thumbnail::scale_to_fit(&image, THUMBNAIL_BOUND, THUMBNAIL_BOUND);

        Ok(Self {
            source_path: path.to_path_buf(),
            capture_timestamp: metadata.timestamp,
            device_make: metadata.make,
            device_model: metadata.model,
            thumbnail: thumb,
            full_view: None,
        })
    }

    /// Path of the original file
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Base filename of the original file, used for export naming
    pub fn basename(&self) -> &std::ffi::OsStr {
        self.source_path
            .file_name()
            .unwrap_or(self.source_path.as_os_str())
    }

    /// The eager grid thumbnail, always present
    pub fn thumbnail(&self) -> &DynamicImage {
        &self.thumbnail
    }

    /// The detail view, derived and cached on first call
    ///
    /// Re-decodes the source file at the larger bound; fails if the file
    /// has become unreadable since import. Subsequent calls return the
    /// cached image without touching the file system.
    pub fn full_view(&mut self) -> Result<&DynamicImage> {
        if self.full_view.is_none() {
            let image = thumbnail::decode_image(&self.source_path)?;
            self.full_view = Some(thumbnail::scale_to_fit(&image, FULL_VIEW_BOUND, FULL_VIEW_BOUND));
        }
        // Just populated above when it was absent
        Ok(self.full_view.as_ref().unwrap())
    }

    /// Whether the detail view has been derived yet
    pub fn has_full_view(&self) -> bool {
        self.full_view.is_some()
    }
}

/// Chronological ordering used by the collection
///
/// Records with a capture timestamp sort ascending and before every record
/// without one; two records without timestamps compare equal, so a stable
/// sort keeps their original insertion order.
pub fn chronological_order(a: &ImageRecord, b: &ImageRecord) -> Ordering {
    match (&a.capture_timestamp, &b.capture_timestamp) {
        (Some(ta), Some(tb)) => ta.cmp(tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
