//! Capture metadata extraction from EXIF tags
//!
//! Reads the capture timestamp and the device make/model out of an image
//! file. Metadata is best-effort: PNG files and stripped JPEGs simply have
//! no tag block, which is a valid state, not a failure.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// EXIF tags to try for date extraction, in priority order
const DATE_TAGS: &[Tag] = &[
    Tag::DateTimeOriginal,  // When the original image was taken
    Tag::DateTimeDigitized, // When the image was digitized
    Tag::DateTime,          // File modification date/time
];

/// Metadata extracted from an image file; every field is optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureMetadata {
    /// Capture timestamp, from the first date tag that parses
    pub timestamp: Option<NaiveDateTime>,
    /// Camera manufacturer
    pub make: Option<String>,
    /// Camera model
    pub model: Option<String>,
}

impl CaptureMetadata {
    /// True when no recognized tag was present
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none() && self.make.is_none() && self.model.is_none()
    }
}

/// Read capture metadata from an image file
///
/// Returns `Err` only when the container itself cannot be opened or carries
/// no EXIF block at all; callers treat that as absent metadata.
pub fn read_capture_metadata(path: &Path) -> Result<CaptureMetadata> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::decode(path, e))?;

    let mut metadata = CaptureMetadata::default();

    for tag in DATE_TAGS {
        if let Some(field) = exif.get_field(*tag, In::PRIMARY)
            && let Some(datetime) = parse_exif_datetime(&field.display_value().to_string())
        {
            trace!(?path, ?tag, "Found EXIF date");
            metadata.timestamp = Some(datetime);
            break;
        }
    }

    if let Some(field) = exif.get_field(Tag::Make, In::PRIMARY) {
        metadata.make = Some(clean_string_field(&field.display_value().to_string()));
    }
    if let Some(field) = exif.get_field(Tag::Model, In::PRIMARY) {
        metadata.model = Some(clean_string_field(&field.display_value().to_string()));
    }

    Ok(metadata)
}

/// Strip the quoting kamadak-exif adds around ASCII string values
fn clean_string_field(s: &str) -> String {
    s.trim().trim_matches('"').trim().to_string()
}

/// Parse EXIF datetime string format: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    // EXIF format: "2024:01:15 14:30:00" or with quotes
    let s = s.trim().trim_matches('"');

    // Try standard EXIF format
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    // Try with subseconds
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%.f") {
        return Some(dt);
    }

    // Try alternative formats
    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    None
}
