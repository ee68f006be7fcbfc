use crate::models::JobListing;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

const RECORD_EXTENSION: &str = "json";

/// Append-only directory of job listings, one JSON file per record.
///
/// Files are named with a zero-padded sequence number so that sorting the
/// names lexically yields insertion order.
#[derive(Debug)]
pub struct Dataset {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl Dataset {
    /// Open (and create) the dataset directory.
    ///
    /// With `purge` every existing record is removed first; otherwise numbering
    /// continues after the highest record already present.
    pub fn open(dir: impl Into<PathBuf>, purge: bool) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create dataset directory {}", dir.display()))?;

        let existing = record_files(&dir)?;
        if purge && !existing.is_empty() {
            for (_, path) in &existing {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to purge {}", path.display()))?;
            }
            info!("🧹 Purged {} records from {}", existing.len(), dir.display());
        }

        let last_id = if purge {
            0
        } else {
            existing.iter().map(|(id, _)| *id).max().unwrap_or(0)
        };

        Ok(Self {
            dir,
            next_id: AtomicU64::new(last_id + 1),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one record. Never overwrites an existing file.
    pub fn push(&self, listing: &JobListing) -> Result<PathBuf> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let path = self.dir.join(format!("{:09}.{}", id, RECORD_EXTENSION));

        let json = serde_json::to_string_pretty(listing)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create record {}", path.display()))?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        debug!("Stored record {}", path.display());
        Ok(path)
    }

    /// Number of records currently on disk
    pub fn count(&self) -> Result<usize> {
        Ok(record_files(&self.dir)?.len())
    }
}

/// Numbered record files in `dir`, ignoring anything not written by a dataset
fn record_files(dir: &Path) -> Result<Vec<(u64, PathBuf)>> {
    let mut records = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
            continue;
        }
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u64>().ok());
        if let Some(id) = id {
            records.push((id, path));
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use tempfile::tempdir;

    fn listing(title: &str) -> JobListing {
        JobListing {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Prague".to_string(),
            url: "https://example.com".to_string(),
            source: Source::LinkedIn,
            is_remote: false,
            posted_date: None,
            description: None,
        }
    }

    #[test]
    fn test_records_sort_in_insertion_order() {
        let dir = tempdir().unwrap();
        let dataset = Dataset::open(dir.path(), true).unwrap();

        let first = dataset.push(&listing("Product Manager")).unwrap();
        let second = dataset.push(&listing("Product Owner")).unwrap();

        assert_eq!(first.file_name().unwrap(), "000000001.json");
        assert_eq!(second.file_name().unwrap(), "000000002.json");
        assert_eq!(dataset.count().unwrap(), 2);

        let stored: JobListing =
            serde_json::from_str(&fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(stored.title, "Product Owner");
    }

    #[test]
    fn test_purge_on_open() {
        let dir = tempdir().unwrap();
        Dataset::open(dir.path(), true)
            .unwrap()
            .push(&listing("Product Manager"))
            .unwrap();
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        let dataset = Dataset::open(dir.path(), true).unwrap();
        assert_eq!(dataset.count().unwrap(), 0);
        assert!(dir.path().join("notes.txt").exists());

        let path = dataset.push(&listing("Product Lead")).unwrap();
        assert_eq!(path.file_name().unwrap(), "000000001.json");
    }

    #[test]
    fn test_numbering_continues_without_purge() {
        let dir = tempdir().unwrap();
        let dataset = Dataset::open(dir.path(), true).unwrap();
        dataset.push(&listing("a product")).unwrap();
        dataset.push(&listing("b product")).unwrap();

        let reopened = Dataset::open(dir.path(), false).unwrap();
        let path = reopened.push(&listing("c product")).unwrap();
        assert_eq!(path.file_name().unwrap(), "000000003.json");
        assert_eq!(reopened.count().unwrap(), 3);
    }
}
