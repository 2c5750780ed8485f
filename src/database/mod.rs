//! # Table Persistence
//!
//! Tables are stored whole under their name. Every save replaces the complete
//! document: there is no row-level update and no version check, so two writers
//! racing on the same table lose one of the writes (last writer wins).
use crate::table::Table;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

pub mod duck;
pub mod memory;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    DuckDBError(#[from] duckdb::Error),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    ParseDateTimeError(#[from] chrono::ParseError),

    #[error("A store lock was poisoned by a panicking writer")]
    LockPoisoned,
}

/// Named table documents with get and replace-by-name semantics.
pub trait TableStore {
    /// Returns the table stored under `name`, or None if there is none.
    fn get(&self, name: &str) -> Result<Option<Table>, StoreError>;

    /// Stores `table` under `table.name`, replacing any previous document.
    /// Returns the time of the write.
    fn replace(&self, table: &Table) -> Result<DateTime<Utc>, StoreError>;

    /// Time of the last write to `name`.
    fn updated_at(&self, name: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Names of all stored tables, sorted.
    fn names(&self) -> Result<Vec<String>, StoreError>;
}
