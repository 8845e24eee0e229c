//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Gallery-Harvest
//! database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track harvest runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    start_url TEXT NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    pages_visited INTEGER,
    items_persisted INTEGER,
    items_skipped INTEGER
);

-- Harvested catalogue records; natural_key carries the dedup contract
CREATE TABLE IF NOT EXISTS artworks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    natural_key TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    locator TEXT NOT NULL,
    artist TEXT NOT NULL,
    date TEXT NOT NULL,
    medium TEXT NOT NULL,
    dimensions TEXT NOT NULL,
    catalogue_number TEXT NOT NULL,
    credit_line TEXT NOT NULL,
    classification TEXT NOT NULL,
    location_status TEXT NOT NULL,
    description TEXT NOT NULL,
    source TEXT,
    first_seen_run INTEGER REFERENCES runs(id),
    harvested_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_artworks_source ON artworks(source);
CREATE INDEX IF NOT EXISTS idx_artworks_catalogue ON artworks(catalogue_number);

-- Items skipped by the per-item failure isolation policy
CREATE TABLE IF NOT EXISTS skipped_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER REFERENCES runs(id),
    locator TEXT NOT NULL,
    reason TEXT NOT NULL,
    occurred_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_skipped_run ON skipped_items(run_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
