//! Record storage trait - mirroring registry writes to durable storage

use std::path::PathBuf;

use crate::error::HieraError;

/// A stored record that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: HieraError,
}

/// Result of scanning a store: the records that parsed and, separately, every
/// entry that did not. A failed entry never shows up in `records`.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub failures: Vec<LoadFailure>,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Durable backing for a [`Registry`](crate::Registry).
pub trait RecordStore<T>: Send + Sync {
    /// Reject a record this store could never save. Runs before the registry
    /// changes anything.
    fn check(&self, _record: &T) -> Result<(), HieraError> {
        Ok(())
    }

    /// Save a record, overwriting any stored record with the same name.
    fn save(&self, record: &T) -> Result<(), HieraError>;

    /// Load every stored record. Per-record failures go into the report;
    /// only a failure to enumerate the store is an `Err`.
    fn load_all(&self) -> Result<LoadReport<T>, HieraError>;
}
