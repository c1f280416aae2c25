//! Walk statistics
//!
//! Counters collected while walking the category tree, and their console
//! rendering once the walk is over.

use chrono::{DateTime, Utc};

/// Walk statistics summary
#[derive(Debug, Clone)]
pub struct WalkStats {
    /// Level-1 departments found on the root page
    pub l1_found: u64,

    /// Level-2 subcategories found across all departments
    pub l2_found: u64,

    /// Level-3 subcategories found across all level-2 hubs
    pub l3_found: u64,

    /// Nodes skipped because another path already reached them
    pub duplicates_skipped: u64,

    /// Category pages entered
    pub categories_visited: u64,

    /// Leaf listings extracted
    pub leaves_scraped: u64,

    /// Product records handed to the sink
    pub records_emitted: u64,

    /// Branches given up because they led to no leaf
    pub branches_abandoned: u64,

    /// Page loads that failed and were skipped
    pub pages_failed: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for WalkStats {
    fn default() -> Self {
        Self {
            l1_found: 0,
            l2_found: 0,
            l3_found: 0,
            duplicates_skipped: 0,
            categories_visited: 0,
            leaves_scraped: 0,
            records_emitted: 0,
            branches_abandoned: 0,
            pages_failed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

impl WalkStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, if the walk has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Average records per scraped leaf
    pub fn records_per_leaf(&self) -> f64 {
        if self.leaves_scraped == 0 {
            return 0.0;
        }
        self.records_emitted as f64 / self.leaves_scraped as f64
    }
}

/// One-line outcome of a walk that wrote to `destination`
///
/// A walk that emitted nothing never creates the output file, so the line
/// only claims a save when records were written.
pub fn completion_message(stats: &WalkStats, destination: &str) -> String {
    if stats.records_emitted > 0 {
        format!("✅ DONE. CSV saved to: {}", destination)
    } else {
        format!("⚠️ DONE. No products found, nothing written to: {}", destination)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &WalkStats) {
    println!("=== Walk Statistics ===\n");

    println!("Category tree:");
    println!("  L1 categories: {}", stats.l1_found);
    println!("  L2 subcategories: {}", stats.l2_found);
    println!("  L3 subcategories: {}", stats.l3_found);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!();

    println!("Pages:");
    println!("  Category pages visited: {}", stats.categories_visited);
    println!("  Leaf listings scraped: {}", stats.leaves_scraped);
    println!("  Branches abandoned: {}", stats.branches_abandoned);
    println!("  Failed loads: {}", stats.pages_failed);
    println!();

    println!("Records:");
    println!("  Emitted: {}", stats.records_emitted);
    println!("  Per leaf: {:.1}", stats.records_per_leaf());
    println!();

    println!("Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(secs) = stats.duration_seconds() {
        println!("Duration: {}s", secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = WalkStats::new();
        assert_eq!(stats.records_emitted, 0);
        assert_eq!(stats.leaves_scraped, 0);
        assert!(stats.finished_at.is_none());
        assert!(stats.duration_seconds().is_none());
    }

    #[test]
    fn test_records_per_leaf() {
        let mut stats = WalkStats::new();
        assert_eq!(stats.records_per_leaf(), 0.0);

        stats.leaves_scraped = 4;
        stats.records_emitted = 10;
        assert!((stats.records_per_leaf() - 2.5).abs() < 0.01);
    }

    #[test]
    fn test_completion_message_reflects_output() {
        let mut stats = WalkStats::new();
        let empty = completion_message(&stats, "out.csv");
        assert!(empty.contains("nothing written"));
        assert!(!empty.contains("saved"));

        stats.records_emitted = 3;
        assert_eq!(
            completion_message(&stats, "out.csv"),
            "✅ DONE. CSV saved to: out.csv"
        );
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut stats = WalkStats::new();
        stats.finish();
        assert!(stats.finished_at.is_some());
        assert!(stats.duration_seconds().unwrap() >= 0);
    }
}
