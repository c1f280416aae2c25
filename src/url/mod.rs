//! URL handling module for Catalog Walker
//!
//! This module resolves hrefs found in catalog markup to absolute URLs and
//! decides which of them belong to the category tree.

mod resolve;

// Re-export main functions
pub use resolve::{is_category_url, resolve_href, CategoryScope};
