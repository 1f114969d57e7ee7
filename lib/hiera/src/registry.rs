//! Name-keyed record registry
//!
//! An ordered, append-or-replace collection with at most one record per name.
//! Records keep the position where their name first appeared; saving a record
//! with a known name replaces it in place.
//!
//! The registry does no locking. Callers that share it between tasks wrap the
//! whole registry in a single mutex so the scan-then-mutate in [`Registry::save`]
//! runs atomically.

use tracing::info;

use crate::error::HieraError;
use crate::store::{LoadFailure, RecordStore};
use crate::types::{Node, Role};

/// A value with a unique name that can be held in a [`Registry`].
pub trait Record: Clone {
    fn name(&self) -> &str;
}

pub struct Registry<T: Record> {
    records: Vec<T>,
    store: Option<Box<dyn RecordStore<T>>>,
}

pub type NodeRegistry = Registry<Node>;
pub type RoleRegistry = Registry<Role>;

impl<T: Record> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Registry<T> {
    /// An empty, memory-only registry.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            store: None,
        }
    }

    /// Build a registry backed by `store`, populated from what the store
    /// already holds. Records that fail to load are returned alongside the
    /// registry and are not inserted. Reloaded records come back in the
    /// store's order (file-name order for [`FileRecordStore`](crate::FileRecordStore)),
    /// not the order they were first saved in.
    pub fn with_store(
        store: impl RecordStore<T> + 'static,
    ) -> Result<(Self, Vec<LoadFailure>), HieraError> {
        let report = store.load_all()?;
        let mut registry = Self::new();
        for record in &report.records {
            registry.upsert(record);
        }
        info!(
            loaded = registry.records.len(),
            failed = report.failures.len(),
            "Reloaded records from store"
        );
        registry.store = Some(Box::new(store));
        Ok((registry, report.failures))
    }

    /// Insert `record`, or replace the record with the same name in place.
    ///
    /// With a store attached the record is first checked against the store,
    /// then written after the in-memory update. A write error is returned but
    /// the in-memory update is kept.
    pub fn save(&mut self, record: &T) -> Result<(), HieraError> {
        if let Some(store) = &self.store {
            store.check(record)?;
        }
        self.upsert(record);
        if let Some(store) = &self.store {
            store.save(record)?;
        }
        Ok(())
    }

    fn upsert(&mut self, record: &T) {
        match self.records.iter_mut().find(|r| r.name() == record.name()) {
            Some(existing) => existing.clone_from(record),
            None => self.records.push(record.clone()),
        }
    }

    /// All records, in order of first insertion.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
