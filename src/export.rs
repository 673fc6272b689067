//! Random, non-repeating export of records to a destination folder
//!
//! Selection is a partial Fisher-Yates shuffle over the current indices,
//! which keeps "choose the sample" separate from "mutate the collection":
//! only records whose copy actually succeeded are removed. A record whose
//! copy fails stays in the collection and is reported.

use crate::collection::Collection;
use crate::error::{Error, Result};
use rand::Rng;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One record whose file could not be copied
#[derive(Debug, Clone)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of an export call
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Destination paths written, one per removed record
    pub exported: Vec<PathBuf>,
    /// Records skipped because their copy failed; still in the collection
    pub failures: Vec<ExportFailure>,
}

/// Export `k` random records using the thread-local generator
pub fn export_random(collection: &mut Collection, k: usize, dest: &Path) -> Result<ExportReport> {
    export_random_with(collection, k, dest, &mut rand::rng())
}

/// Export `min(k, len)` distinct records chosen uniformly at random
///
/// Validates the destination before any copy; an unwritable destination
/// aborts the whole operation with the collection untouched. Each chosen
/// record's file is copied to `dest/<basename>` (basename collisions are
/// last-write-wins), and successfully copied records are removed from the
/// collection.
pub fn export_random_with<R: Rng>(
    collection: &mut Collection,
    k: usize,
    dest: &Path,
    rng: &mut R,
) -> Result<ExportReport> {
    ensure_writable_dir(dest)?;

    let count = k.min(collection.len());
    if count == 0 {
        debug!("Nothing to export");
        return Ok(ExportReport::default());
    }

    let selected = sample_indices(collection.len(), count, rng);

    let mut report = ExportReport::default();
    let mut removable: Vec<usize> = Vec::with_capacity(count);

    for &index in &selected {
        let record = &collection.records()[index];
        let source = record.source_path().to_path_buf();
        let target = dest.join(record.basename());

        match copy_file(&source, &target) {
            Ok(()) => {
                debug!(source = %source.display(), target = %target.display(), "Exported");
                removable.push(index);
                report.exported.push(target);
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "Copy failed, record kept");
                report.failures.push(ExportFailure {
                    path: source,
                    message: e.to_string(),
                });
            }
        }
    }

    // Only records with a successful copy leave the collection
    collection.take_indices(&removable);

    info!(
        exported = report.exported.len(),
        failed = report.failures.len(),
        remaining = collection.len(),
        "Export complete"
    );
    Ok(report)
}

/// Draw `count` distinct indices from `0..len` uniformly at random
///
/// Partial Fisher-Yates: shuffle only the prefix that is actually drawn,
/// so every size-`count` selection is equally likely without touching the
/// records themselves.
fn sample_indices<R: Rng>(len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..count {
        let j = rng.random_range(i..len);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}

/// Fail fast when the destination cannot receive any file
///
/// A metadata check alone misses per-user permission setups, so this
/// probes with a short-lived marker file.
fn ensure_writable_dir(dest: &Path) -> Result<()> {
    let unwritable = |message: String| Error::DestinationUnwritable {
        path: dest.to_path_buf(),
        message,
    };

    if !dest.is_dir() {
        return Err(unwritable("not a directory".to_string()));
    }

    let probe = dest.join(format!(".gallery-picker-probe-{}", std::process::id()));
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
        .map_err(|e| unwritable(e.to_string()))?;
    let _ = fs::remove_file(&probe);

    Ok(())
}

/// Copy file with buffered I/O, preserving the source modification time
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    let copy_err = |e: std::io::Error| Error::Copy {
        path: source.to_path_buf(),
        message: e.to_string(),
    };

    let src_file = File::open(source).map_err(copy_err)?;
    let dest_file = File::create(dest).map_err(copy_err)?;

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let mut buffer = vec![0u8; 256 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(copy_err)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read]).map_err(copy_err)?;
    }
    writer.flush().map_err(copy_err)?;

    if let Ok(metadata) = fs::metadata(source)
        && let Ok(mtime) = metadata.modified()
    {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::NoProgress;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn populate(dir: &Path, count: usize) -> Collection {
        let paths: Vec<PathBuf> = (0..count)
            .map(|i| {
                let path = dir.join(format!("img-{i}.png"));
                image::RgbImage::from_pixel(5, 5, image::Rgb([i as u8, 0, 0]))
                    .save(&path)
                    .unwrap();
                path
            })
            .collect();

        let mut collection = Collection::new();
        let report = collection.import_files(&paths, &mut NoProgress);
        assert_eq!(report.imported, count);
        collection
    }

    #[test]
    fn test_sample_indices_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let sample = sample_indices(10, 4, &mut rng);
            assert_eq!(sample.len(), 4);
            assert!(sample.iter().all(|&i| i < 10));
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_export_removes_records_and_writes_files() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 6);

        let mut rng = StdRng::seed_from_u64(42);
        let report = export_random_with(&mut collection, 4, dest.path(), &mut rng).unwrap();

        assert_eq!(report.exported.len(), 4);
        assert!(report.failures.is_empty());
        assert_eq!(collection.len(), 2);
        for path in &report.exported {
            assert!(path.exists());
            assert_eq!(path.parent().unwrap(), dest.path());
        }
    }

    #[test]
    fn test_export_zero_is_noop() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 3);

        let report = export_random(&mut collection, 0, dest.path()).unwrap();
        assert!(report.exported.is_empty());
        assert_eq!(collection.len(), 3);
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_clamps_to_collection_size() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 3);

        let mut rng = StdRng::seed_from_u64(1);
        let report = export_random_with(&mut collection, 99, dest.path(), &mut rng).unwrap();
        assert_eq!(report.exported.len(), 3);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_sequential_exports_never_repeat() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 8);

        let mut rng = StdRng::seed_from_u64(9);
        let mut seen: HashSet<PathBuf> = HashSet::new();
        for _ in 0..4 {
            let report = export_random_with(&mut collection, 2, dest.path(), &mut rng).unwrap();
            for path in report.exported {
                assert!(seen.insert(path), "a record was exported twice");
            }
        }
        assert!(collection.is_empty());
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_invalid_destination_aborts_before_copy() {
        let src = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 2);

        let result = export_random(&mut collection, 1, Path::new("/no/such/destination"));
        assert!(matches!(result, Err(Error::DestinationUnwritable { .. })));
        assert_eq!(collection.len(), 2);

        // A plain file is not a usable destination either
        let file_dest = src.path().join("img-0.png");
        let result = export_random(&mut collection, 1, &file_dest);
        assert!(matches!(result, Err(Error::DestinationUnwritable { .. })));
    }

    #[test]
    fn test_failed_copy_keeps_record() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 2);

        // Make both source files unreadable by deleting them after import
        std::fs::remove_file(src.path().join("img-0.png")).unwrap();
        std::fs::remove_file(src.path().join("img-1.png")).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let report = export_random_with(&mut collection, 2, dest.path(), &mut rng).unwrap();

        assert!(report.exported.is_empty());
        assert_eq!(report.failures.len(), 2);
        // Skip-and-report: failed records stay in the collection
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_export_preserves_basename() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut collection = populate(src.path(), 1);

        let report = export_random(&mut collection, 1, dest.path()).unwrap();
        assert_eq!(report.exported[0], dest.path().join("img-0.png"));
    }
}
