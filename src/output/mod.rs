//! Output module: product records and where they go
//!
//! This module handles:
//! - The fixed product record schema and its column order
//! - Sinks that persist records (CSV file, in-memory)
//! - Walk statistics and their console summary

mod csv_sink;
mod record;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use record::{CategoryPath, ProductRecord, COLUMNS};
pub use stats::{completion_message, print_statistics, WalkStats};
pub use traits::{MemorySink, RecordSink};
