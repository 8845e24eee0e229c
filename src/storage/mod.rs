//! Storage module for persisting harvested records
//!
//! This module handles all database operations for the harvester, including:
//! - SQLite database initialization and schema management
//! - Artwork record persistence with natural-key deduplication
//! - Skipped-item bookkeeping for post-run inspection
//! - Run tracking (timestamps, config hash, final counts)

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteSink;
pub use traits::{RecordSink, StorageError, StorageResult};

/// Represents a harvest run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub source: String,
    pub start_url: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub pages_visited: Option<u32>,
    pub items_persisted: Option<u32>,
    pub items_skipped: Option<u32>,
}

/// An item the driver could not harvest, with the reason it was skipped
#[derive(Debug, Clone)]
pub struct SkippedItemRecord {
    pub run_id: Option<i64>,
    pub locator: String,
    pub reason: String,
    pub occurred_at: String,
}

/// Status of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Interrupted,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "interrupted" => Some(Self::Interrupted),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
