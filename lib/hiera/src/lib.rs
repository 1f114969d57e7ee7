//! Hiera inventory library
//!
//! Node and role records, the name-keyed registry that holds them, and an
//! optional file store that mirrors registry writes to disk.

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::unwrap_in_result)
)]

pub mod error;
pub mod file_store;
pub mod registry;
pub mod store;
pub mod types;

pub use error::HieraError;
pub use file_store::FileRecordStore;
pub use registry::{NodeRegistry, Record, Registry, RoleRegistry};
pub use store::{LoadFailure, LoadReport, RecordStore};
pub use types::{ErrorCode, ErrorResponse, Node, NodeList, Role, RoleList};
