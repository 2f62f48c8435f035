mod memory;
mod rest;
mod sqlite;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::record::{StudentFields, StudentRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no student with id {id}")]
    NotFound { id: String },

    #[error("backend unreachable: {0}")]
    Connectivity(String),

    #[error("backend rejected the operation: {0}")]
    Persistence(String),
}

/// The persistence boundary for student records. The three implementations
/// (in-memory list, sqlite table, REST resource) are interchangeable; callers
/// see insertion-ordered lists, store-assigned string ids, full-replace
/// updates, and an error on delete/update of a missing id.
///
/// Implementations must not hold a connection across calls: each operation
/// acquires, uses, and releases whatever it needs.
pub trait RecordStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError>;
    fn create(&mut self, fields: &StudentFields) -> Result<StudentRecord, StoreError>;
    fn update(&mut self, id: &str, fields: &StudentFields) -> Result<StudentRecord, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}
