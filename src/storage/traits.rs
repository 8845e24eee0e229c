//! Sink trait and storage error types

use crate::extract::DetailRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("No active run")]
    NoActiveRun,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable destination for harvested records
///
/// The sink has at-least-once delivery semantics: `upsert` with an already
/// seen natural key is silently ignored, so re-running a crawl after a
/// partial failure is safe. Implementations must tolerate concurrent upserts
/// with the same key should the driver ever be parallelized.
pub trait RecordSink {
    /// Stores a record, deduplicating on its natural key
    ///
    /// Returns true if a new row was inserted, false if the key was already
    /// present.
    fn upsert(&mut self, record: &DetailRecord) -> StorageResult<bool>;

    /// Records an item the driver had to skip, with the failure reason
    fn record_skip(&mut self, locator: &str, reason: &str) -> StorageResult<()>;
}
