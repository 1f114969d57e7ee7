//! File-based record storage

use std::io::Write;
use std::marker::PhantomData;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::HieraError;
use crate::registry::Record;
use crate::store::{LoadFailure, LoadReport, RecordStore};

/// Longest file name most filesystems accept, in bytes.
const MAX_NAME_LEN: usize = 255;

/// A directory entry, or the path and error to report for it.
type Listing = Result<(PathBuf, bool), (PathBuf, std::io::Error)>;

/// One JSON file per record, named after the record.
pub struct FileRecordStore<T> {
    dir: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> FileRecordStore<T> {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, HieraError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| HieraError::StorageError(e.to_string()))?;
        Ok(Self {
            dir,
            _record: PhantomData,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The record name must be a single plain path component so it cannot
    /// escape the store directory, and must be a file name the filesystem can
    /// create.
    fn record_path(&self, name: &str) -> Result<PathBuf, HieraError> {
        if name.len() > MAX_NAME_LEN || name.contains('\0') {
            return Err(HieraError::InvalidName(name.to_string()));
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) if c == name => Ok(self.dir.join(name)),
            _ => Err(HieraError::InvalidName(name.to_string())),
        }
    }
}

/// Split a directory listing into the files to load and the entries that
/// could not be inspected. Subdirectories are skipped.
fn split_listing(
    listing: impl IntoIterator<Item = Listing>,
) -> (Vec<PathBuf>, Vec<LoadFailure>) {
    let mut paths = Vec::new();
    let mut failures = Vec::new();
    for entry in listing {
        match entry {
            Ok((_, true)) => continue,
            Ok((path, false)) => paths.push(path),
            Err((path, e)) => {
                warn!("Cannot inspect {}: {}", path.display(), e);
                failures.push(LoadFailure {
                    path,
                    error: e.into(),
                });
            }
        }
    }
    (paths, failures)
}

impl<T> FileRecordStore<T>
where
    T: Record + DeserializeOwned,
{
    fn load_file(&self, path: &Path) -> Result<T, HieraError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HieraError::InvalidName(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path)?;
        let record: T = serde_json::from_str(&contents)?;
        if record.name() != file_name {
            return Err(HieraError::StorageError(format!(
                "record {} stored under file name {}",
                record.name(),
                file_name
            )));
        }
        Ok(record)
    }
}

impl<T> RecordStore<T> for FileRecordStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    fn check(&self, record: &T) -> Result<(), HieraError> {
        self.record_path(record.name()).map(|_| ())
    }

    fn save(&self, record: &T) -> Result<(), HieraError> {
        let path = self.record_path(record.name())?;
        let contents = serde_json::to_string_pretty(record)?;
        let mut file =
            std::fs::File::create(&path).map_err(|e| HieraError::StorageError(e.to_string()))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| HieraError::StorageError(e.to_string()))?;
        file.sync_all()
            .map_err(|e| HieraError::StorageError(e.to_string()))?;
        Ok(())
    }

    fn load_all(&self) -> Result<LoadReport<T>, HieraError> {
        let listing = std::fs::read_dir(&self.dir)?.map(|entry| -> Listing {
            let entry = entry.map_err(|e| (self.dir.clone(), e))?;
            let path = entry.path();
            match entry.file_type() {
                Ok(file_type) => Ok((path, file_type.is_dir())),
                Err(e) => Err((path, e)),
            }
        });
        let (mut paths, failures) = split_listing(listing);
        paths.sort();

        let mut report = LoadReport {
            records: Vec::new(),
            failures,
        };

        for path in paths {
            match self.load_file(&path) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!("Skipping {}: {}", path.display(), error);
                    report.failures.push(LoadFailure { path, error });
                }
            }
        }

        Ok(report)
    }
}
