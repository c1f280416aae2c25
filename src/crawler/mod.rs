//! Crawler module: category tree traversal and product extraction
//!
//! This module contains the core walking logic, including:
//! - Page loading with bounded settle polling
//! - Leaf vs hub classification
//! - Category link collection
//! - Product extraction with per-field fallback
//! - Overall traversal orchestration

pub mod classifier;
mod dom;
mod extractor;
mod links;
mod loader;
mod selectors;
mod walker;

pub use classifier::{classify, is_leaf, PageKind};
pub use dom::{clean_text, extract_optional, Accessor};
pub use extractor::extract_products;
pub use links::{collect_categories, collect_children, CategoryNode, Level};
pub use loader::{build_http_client, poll_until, HttpPageLoader, Page, PageLoader, SettlePolicy};
pub use selectors::SelectorSet;
pub use walker::TreeWalker;

use crate::config::Config;
use crate::output::{CsvSink, WalkStats};
use crate::url::CategoryScope;
use crate::Result;
use std::sync::Arc;

/// Runs a complete walk with the HTTP loader and CSV sink
///
/// This is the main entry point for a run. It will:
/// 1. Compile the configured selectors
/// 2. Build the HTTP page loader
/// 3. Walk the category tree from the configured root
/// 4. Append every extracted record to the configured CSV file
///
/// # Returns
///
/// * `Ok(WalkStats)` - Walk completed
/// * `Err(WalkerError)` - Walk could not start or was cut short
pub async fn walk(config: &Config) -> Result<WalkStats> {
    let selectors = Arc::new(SelectorSet::from_config(&config.selectors)?);
    let scope = CategoryScope::from_site(&config.site)?;
    let loader = HttpPageLoader::new(config, Arc::clone(&selectors))?;
    let sink = CsvSink::new(&config.output.csv_path);

    let mut walker = TreeWalker::new(loader, sink, selectors, scope);
    walker.walk(&config.site.root_url).await
}
