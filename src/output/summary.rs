//! Run summaries and database statistics
//!
//! This module provides functionality for displaying the outcome of a
//! harvest run and for inspecting what the database holds across runs.

use crate::crawler::HarvestSummary;
use crate::storage::{RunRecord, SqliteSink, StorageResult};

/// Database-wide statistics across all recorded runs
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Total harvested records
    pub total_records: u64,

    /// Total skipped items across all runs
    pub total_skipped: u64,

    /// All recorded runs, oldest first
    pub runs: Vec<RunRecord>,
}

/// Loads statistics from the record database
pub fn load_statistics(sink: &SqliteSink) -> StorageResult<DatabaseStats> {
    Ok(DatabaseStats {
        total_records: sink.count_records()?,
        total_skipped: sink.count_skipped()?,
        runs: sink.list_runs()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &DatabaseStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Records harvested: {}", stats.total_records);
    println!("  Items skipped: {}", stats.total_skipped);
    println!("  Runs recorded: {}", stats.runs.len());
    println!();

    if !stats.runs.is_empty() {
        println!("Runs:");
        for run in &stats.runs {
            println!(
                "  #{} {} [{}] started {} - {} pages, {} persisted, {} skipped",
                run.id,
                run.source,
                run.status.to_db_string(),
                run.started_at,
                count_or_dash(run.pages_visited),
                count_or_dash(run.items_persisted),
                count_or_dash(run.items_skipped),
            );
        }
    }
}

/// Prints the end-of-run summary to stdout
pub fn print_run_summary(summary: &HarvestSummary) {
    println!("\n=== Harvest Summary ===\n");
    println!("  Pages visited: {}", summary.pages_visited);
    println!("  Items persisted: {}", summary.items_persisted);
    println!("  Items skipped: {}", summary.items_skipped);
    println!("  Outcome: {}", summary.termination);
}

fn count_or_dash(count: Option<u32>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RunStatus;

    #[test]
    fn test_count_or_dash() {
        assert_eq!(count_or_dash(Some(12)), "12");
        assert_eq!(count_or_dash(None), "-");
    }

    #[test]
    fn test_load_statistics_empty_database() {
        let sink = SqliteSink::new_in_memory().unwrap();
        let stats = load_statistics(&sink).unwrap();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.total_skipped, 0);
        assert!(stats.runs.is_empty());
    }

    #[test]
    fn test_load_statistics_counts_runs() {
        let mut sink = SqliteSink::new_in_memory().unwrap();
        sink.begin_run("model-gallery", "https://example.com/", "hash")
            .unwrap();
        sink.finish_run(RunStatus::Completed, 2, 10, 1).unwrap();

        let stats = load_statistics(&sink).unwrap();
        assert_eq!(stats.runs.len(), 1);
        assert_eq!(stats.runs[0].items_persisted, Some(10));
    }
}
