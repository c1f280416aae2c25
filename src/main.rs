//! Catalog Walker main entry point
//!
//! This is the command-line interface for the Catalog Walker scraper.

use anyhow::Context;
use catalog_walker::config::{builtin_config, load_config_with_hash, Config};
use catalog_walker::crawler::walk;
use catalog_walker::output::{completion_message, print_statistics, COLUMNS};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog Walker: a category-tree product catalog scraper
///
/// Walks the retailer's department, subcategory and leaf listing pages from
/// the configured root page and appends one CSV row per listed product.
#[derive(Parser, Debug)]
#[command(name = "catalog-walker")]
#[command(version)]
#[command(about = "A category-tree product catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration without walking
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("Using built-in configuration");
            builtin_config().context("validating built-in configuration")?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_walk(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_walker=info,warn"),
            1 => EnvFilter::new("catalog_walker=debug,info"),
            2 => EnvFilter::new("catalog_walker=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be walked
fn handle_dry_run(config: &Config) {
    println!("=== Catalog Walker Dry Run ===\n");

    println!("Site:");
    println!("  Root: {}", config.site.root_url);
    println!("  Base: {}", config.site.base_url);
    println!("  Category prefix: {}", config.site.category_prefix);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nLoader:");
    println!("  Settle delay: {}ms", config.loader.settle_delay);
    println!("  Settle timeout: {}ms", config.loader.settle_timeout);
    println!("  Poll interval: {}ms", config.loader.poll_interval);
    println!("  Request timeout: {}s", config.loader.request_timeout);

    let s = &config.selectors;
    println!("\nSelectors:");
    println!("  L1 card: {} (title: {}, link: {})", s.l1_card, s.l1_title, s.l1_link);
    println!("  Subcategory link: {}", s.subcategory_link);
    println!("  Product item: {}", s.product_item);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Columns: {}", COLUMNS.join(","));

    println!("\n✓ Configuration is valid");
}

/// Handles the main walk operation
async fn handle_walk(config: &Config, quiet: bool) -> anyhow::Result<()> {
    match walk(config).await {
        Ok(stats) => {
            println!("\n{}", completion_message(&stats, &config.output.csv_path));
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Walk failed: {}", e);
            Err(e.into())
        }
    }
}
