use serde::Deserialize;

/// Main configuration structure for Gallery-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub harvest: HarvestConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Which collection to harvest and where to start
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Registered extractor name (e.g. "national-gallery")
    pub name: String,

    /// First list page of the collection
    #[serde(rename = "start-url")]
    pub start_url: String,
}

/// Harvest behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// Pause before each page fetch (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// How many times a transient fetch failure is retried
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause between retries of the same page (milliseconds)
    #[serde(rename = "retry-delay")]
    pub retry_delay: u64,

    /// Consecutive detail-page failures tolerated before the run aborts
    #[serde(rename = "max-consecutive-item-failures")]
    pub max_consecutive_item_failures: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the harvester
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for harvester-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path the --export-csv mode writes to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}
