//! Gallery-Harvest: a museum catalogue harvester
//!
//! This crate implements a paginated detail-crawl engine that walks museum and
//! gallery online collections, extracts per-artwork records, and persists them
//! for later survey-based analysis.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Gallery-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Expected HTML from {url}, got {content_type}")]
    UnexpectedContent { url: String, content_type: String },

    #[error("List page {url} could not be processed: {message}")]
    ListPage { url: String, message: String },

    #[error("Aborted after {count} consecutive item failures")]
    ItemFailureLimit { count: u32 },

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Gallery-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HarvestSummary, Harvester, StopHandle, Termination};
pub use extract::{DetailRecord, Extractor, ItemReference, NOT_AVAILABLE};
