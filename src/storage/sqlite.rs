//! SQLite sink implementation
//!
//! This module provides the SQLite-backed implementation of the RecordSink
//! trait, plus the run bookkeeping and query surface used by the CLI's
//! stats and export modes.

use crate::extract::DetailRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{RecordSink, StorageError, StorageResult};
use crate::storage::{RunRecord, RunStatus, SkippedItemRecord};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite record sink
pub struct SqliteSink {
    conn: Connection,
    run_id: Option<i64>,
    source: Option<String>,
}

impl SqliteSink {
    /// Opens (or creates) the database at the given path
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            run_id: None,
            source: None,
        })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            run_id: None,
            source: None,
        })
    }

    // ===== Run Management =====

    /// Opens a new run; subsequent upserts and skips are attributed to it
    pub fn begin_run(
        &mut self,
        source: &str,
        start_url: &str,
        config_hash: &str,
    ) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (source, start_url, started_at, config_hash, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                source,
                start_url,
                now,
                config_hash,
                RunStatus::Running.to_db_string()
            ],
        )?;

        let run_id = self.conn.last_insert_rowid();
        self.run_id = Some(run_id);
        self.source = Some(source.to_string());
        Ok(run_id)
    }

    /// Closes the active run with its final status and counts
    pub fn finish_run(
        &mut self,
        status: RunStatus,
        pages_visited: u32,
        items_persisted: u32,
        items_skipped: u32,
    ) -> StorageResult<()> {
        let run_id = self.run_id.ok_or(StorageError::NoActiveRun)?;
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, pages_visited = ?3,
             items_persisted = ?4, items_skipped = ?5 WHERE id = ?6",
            params![
                status.to_db_string(),
                now,
                pages_visited,
                items_persisted,
                items_skipped,
                run_id
            ],
        )?;
        Ok(())
    }

    /// Gets the most recent run
    pub fn latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, start_url, started_at, finished_at, config_hash, status,
             pages_visited, items_persisted, items_skipped
             FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        let run = stmt.query_row([], row_to_run).optional()?;
        Ok(run)
    }

    /// Gets all runs, oldest first
    pub fn list_runs(&self) -> StorageResult<Vec<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, start_url, started_at, finished_at, config_hash, status,
             pages_visited, items_persisted, items_skipped
             FROM runs ORDER BY id ASC",
        )?;

        let runs = stmt
            .query_map([], row_to_run)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }

    // ===== Queries =====

    /// Total number of harvested records
    pub fn count_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM artworks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Total number of skipped items across all runs
    pub fn count_skipped(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM skipped_items", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// All harvested records in insertion order
    pub fn load_records(&self) -> StorageResult<Vec<DetailRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, locator, artist, date, medium, dimensions, catalogue_number,
             credit_line, classification, location_status, description
             FROM artworks ORDER BY id ASC",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(DetailRecord {
                    title: row.get(0)?,
                    locator: row.get(1)?,
                    artist: row.get(2)?,
                    date: row.get(3)?,
                    medium: row.get(4)?,
                    dimensions: row.get(5)?,
                    catalogue_number: row.get(6)?,
                    credit_line: row.get(7)?,
                    classification: row.get(8)?,
                    location_status: row.get(9)?,
                    description: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Skipped items recorded for one run
    pub fn skips_for_run(&self, run_id: i64) -> StorageResult<Vec<SkippedItemRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, locator, reason, occurred_at
             FROM skipped_items WHERE run_id = ?1 ORDER BY id ASC",
        )?;

        let skips = stmt
            .query_map(params![run_id], |row| {
                Ok(SkippedItemRecord {
                    run_id: row.get(0)?,
                    locator: row.get(1)?,
                    reason: row.get(2)?,
                    occurred_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(skips)
    }
}

impl RecordSink for SqliteSink {
    fn upsert(&mut self, record: &DetailRecord) -> StorageResult<bool> {
        let now = Utc::now().to_rfc3339();
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO artworks
             (natural_key, title, locator, artist, date, medium, dimensions,
              catalogue_number, credit_line, classification, location_status,
              description, source, first_seen_run, harvested_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                record.natural_key(),
                record.title,
                record.locator,
                record.artist,
                record.date,
                record.medium,
                record.dimensions,
                record.catalogue_number,
                record.credit_line,
                record.classification,
                record.location_status,
                record.description,
                self.source,
                self.run_id,
                now
            ],
        )?;
        Ok(changed > 0)
    }

    fn record_skip(&mut self, locator: &str, reason: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO skipped_items (run_id, locator, reason, occurred_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.run_id, locator, reason, now],
        )?;
        Ok(())
    }
}

fn row_to_run(row: &rusqlite::Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        source: row.get(1)?,
        start_url: row.get(2)?,
        started_at: row.get(3)?,
        finished_at: row.get(4)?,
        config_hash: row.get(5)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(6)?).unwrap_or(RunStatus::Running),
        pages_visited: row.get(7)?,
        items_persisted: row.get(8)?,
        items_skipped: row.get(9)?,
    })
}
