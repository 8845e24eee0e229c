//! Gallery-Harvest main entry point
//!
//! This is the command-line interface for the Gallery-Harvest catalogue
//! harvester.

use anyhow::Context;
use clap::Parser;
use gallery_harvest::config::{load_config_with_hash, Config};
use gallery_harvest::crawler::{run_harvest, StopHandle, Termination};
use gallery_harvest::output::{export_csv, load_statistics, print_run_summary, print_statistics};
use gallery_harvest::storage::SqliteSink;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Gallery-Harvest: a museum catalogue harvester
///
/// Gallery-Harvest walks a museum's paginated online collection, extracts a
/// record per artwork, and stores the records for survey-based analysis.
#[derive(Parser, Debug)]
#[command(name = "gallery-harvest")]
#[command(version = "0.2.0")]
#[command(about = "A museum catalogue harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Delete the existing database before harvesting
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with_all = ["stats", "export_csv"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_csv"])]
    stats: bool,

    /// Export harvested records as CSV and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_csv: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else if cli.stats {
        handle_stats(&config)
    } else if cli.export_csv {
        handle_export_csv(&config)
    } else {
        handle_harvest(&config, &config_hash, cli.fresh).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gallery_harvest=info,warn"),
            1 => EnvFilter::new("gallery_harvest=debug,info"),
            2 => EnvFilter::new("gallery_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== Gallery-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Name: {}", config.source.name);
    println!("  Start URL: {}", config.source.start_url);

    println!("\nHarvest:");
    println!("  Request delay: {}ms", config.harvest.request_delay);
    println!("  Max retries: {}", config.harvest.max_retries);
    println!("  Retry delay: {}ms", config.harvest.retry_delay);
    println!(
        "  Max consecutive item failures: {}",
        config.harvest.max_consecutive_item_failures
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  CSV export: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would harvest '{}' starting from {}",
        config.source.name, config.source.start_url
    );
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let sink = SqliteSink::new(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&sink)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export-csv mode: writes all harvested records to CSV
fn handle_export_csv(config: &Config) -> anyhow::Result<()> {
    println!("=== Exporting Harvested Records ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.csv_path);
    println!();

    let sink = SqliteSink::new(Path::new(&config.output.database_path))?;
    let records = sink.load_records()?;
    export_csv(&records, Path::new(&config.output.csv_path))?;

    println!(
        "✓ Exported {} records to: {}",
        records.len(),
        config.output.csv_path
    );

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config, config_hash: &str, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh harvest (discarding previous records)");
    }

    // Wire the operator interrupt to the driver's stop handle; the driver
    // honors it at phase boundaries, never mid-extraction.
    let stop = StopHandle::new();
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Stop requested, finishing current item");
            ctrl_c_stop.request_stop();
        }
    });

    let summary = run_harvest(config, config_hash, fresh, stop).await?;
    print_run_summary(&summary);

    if let Termination::Failed(message) = &summary.termination {
        anyhow::bail!("harvest failed: {}", message);
    }

    Ok(())
}
