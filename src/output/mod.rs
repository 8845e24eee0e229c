//! Output module for harvest summaries and exports
//!
//! This module handles:
//! - Printing the end-of-run summary
//! - Showing database statistics for past runs
//! - Exporting harvested records as CSV for the downstream survey

mod csv;
mod summary;

pub use csv::export_csv;
pub use summary::{load_statistics, print_run_summary, print_statistics, DatabaseStats};

use thiserror::Error;

/// Errors that can occur while producing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
