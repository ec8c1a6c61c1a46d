//! apg-storage-json
//!
//! Key-value persistence for the form snapshot and the source list, with a
//! versioned form schema and pure migrations for older stored shapes.

pub mod adapter;
pub mod error;
pub mod migrate;
pub mod store;

pub use adapter::{
    LoadReport, PersistenceAdapter, StorageKeys, DEFAULT_FORM_KEY, DEFAULT_SOURCES_KEY,
};
pub use error::StorageError;
pub use migrate::{migrate_form, Migrated, FORM_SCHEMA_VERSION};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
