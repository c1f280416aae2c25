//! Page classification: leaf listing vs category hub
//!
//! A page is a leaf if and only if it contains at least one product item.
//! No other signal is consulted, so a hub page that happens to embed a single
//! product-like element is classified as a leaf. That false positive is a
//! known limitation of the markup-only rule.

use crate::crawler::SelectorSet;
use scraper::Html;

/// What a loaded page offers the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Has product items (subcategory links, if any, are ignored)
    Leaf,
    /// Has subcategory links and no product items
    Hub,
    /// Has neither
    Empty,
}

/// Returns true if the page shows at least one product item
pub fn is_leaf(document: &Html, selectors: &SelectorSet) -> bool {
    document.select(&selectors.product_item).next().is_some()
}

/// Returns true if the page shows at least one subcategory link
pub fn has_subcategory_links(document: &Html, selectors: &SelectorSet) -> bool {
    document.select(&selectors.subcategory_link).next().is_some()
}

/// Classifies a page, giving leaf detection priority
pub fn classify(document: &Html, selectors: &SelectorSet) -> PageKind {
    if is_leaf(document, selectors) {
        PageKind::Leaf
    } else if has_subcategory_links(document, selectors) {
        PageKind::Hub
    } else {
        PageKind::Empty
    }
}

/// Returns true once the page shows anything the walker can act on
///
/// Used by the loader's settle loop: a root page is ready when its
/// department cards render, any other page when product items or
/// subcategory links do.
pub fn is_ready(document: &Html, selectors: &SelectorSet) -> bool {
    is_leaf(document, selectors)
        || has_subcategory_links(document, selectors)
        || document.select(&selectors.l1_card).next().is_some()
}
