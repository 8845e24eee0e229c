//! Harvest engine: fetching, traversal, and per-run dedup state
//!
//! This module contains the core crawl logic, including:
//! - HTTP fetching with retry logic
//! - The list-page/detail-page traversal state machine
//! - Visited-set tracking and cycle guarding

mod driver;
mod fetcher;
mod visited;

pub use driver::{HarvestSummary, Harvester, StopHandle, Termination};
pub use fetcher::{build_http_client, Fetcher};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::storage::{RunStatus, SqliteSink};
use crate::url::parse_locator;
use crate::HarvestError;
use std::path::Path;

/// Runs a complete harvest for the configured source
///
/// This is the main entry point for a harvest. It will:
/// 1. Open (or, with `fresh`, recreate) the record database
/// 2. Record a new run with the config hash
/// 3. Walk the collection from the configured start URL
/// 4. Close the run with its final status and counts
///
/// Stop requests on `stop` are honored at phase boundaries and close the run
/// as interrupted.
pub async fn run_harvest(
    config: &Config,
    config_hash: &str,
    fresh: bool,
    stop: StopHandle,
) -> Result<HarvestSummary, HarvestError> {
    let start = parse_locator(&config.source.start_url)?;

    let db_path = Path::new(&config.output.database_path);
    if fresh {
        remove_database(db_path)?;
    }
    let mut sink = SqliteSink::new(db_path)?;

    let harvester = Harvester::from_config(config, stop)?;

    sink.begin_run(&config.source.name, start.as_str(), config_hash)?;
    let summary = harvester.run(&start, &mut sink).await;

    let status = match summary.termination {
        Termination::Stopped => RunStatus::Interrupted,
        Termination::Failed(_) => RunStatus::Failed,
        _ => RunStatus::Completed,
    };
    sink.finish_run(
        status,
        summary.pages_visited,
        summary.items_persisted,
        summary.items_skipped,
    )?;

    Ok(summary)
}

/// Deletes an existing database and its WAL sidecar files
fn remove_database(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        tracing::info!(path = %path.display(), "removing existing database");
        std::fs::remove_file(path)?;
    }
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_os_string();
        sidecar.push(suffix);
        let sidecar = std::path::PathBuf::from(sidecar);
        if sidecar.exists() {
            std::fs::remove_file(sidecar)?;
        }
    }
    Ok(())
}
