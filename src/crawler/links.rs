//! Category link collection
//!
//! Extracts the child nodes of a category page: department cards on the
//! root page, subcategory anchors on level 2 and level 3 pages.
//!
//! # Rules
//!
//! - hrefs are resolved against the site base and must lie under the
//!   category prefix; anything else is navigation chrome and is dropped
//! - titles are whitespace-normalized; an empty title drops the candidate
//! - duplicates by URL collapse to their first occurrence, DOM order is kept
//!
//! Malformed candidates are skipped silently: collection never fails, it
//! only returns fewer nodes.

use crate::crawler::dom::element_text;
use crate::crawler::SelectorSet;
use crate::url::CategoryScope;
use scraper::Html;
use std::collections::HashSet;
use std::fmt;

/// Depth of a node in the category tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    L1,
    L2,
    L3,
}

impl Level {
    pub fn depth(&self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }

    /// The level below this one, if the walk goes that deep
    pub fn next(&self) -> Option<Level> {
        match self {
            Self::L1 => Some(Self::L2),
            Self::L2 => Some(Self::L3),
            Self::L3 => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.depth())
    }
}

/// A link to a category page, as found on its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub title: String,
    pub url: String,
    pub level: Level,
}

/// Collects level-1 departments from the root page's cards
///
/// Each card contributes the text of its title element and the href of its
/// link element.
pub fn collect_categories(
    document: &Html,
    scope: &CategoryScope,
    selectors: &SelectorSet,
) -> Vec<CategoryNode> {
    let candidates = document.select(&selectors.l1_card).filter_map(|card| {
        let title = card
            .select(&selectors.l1_title)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let href = card
            .select(&selectors.l1_link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .unwrap_or_default();
        candidate(scope, title, href, Level::L1)
    });

    dedup_by_url(candidates)
}

/// Collects subcategory links from a level-1 or level-2 page
///
/// The same anchor markup is used on both levels; `level` tags the nodes
/// with the depth they will be visited at.
pub fn collect_children(
    document: &Html,
    scope: &CategoryScope,
    selectors: &SelectorSet,
    level: Level,
) -> Vec<CategoryNode> {
    let candidates = document
        .select(&selectors.subcategory_link)
        .filter_map(|link| {
            let href = link.value().attr("href").unwrap_or_default();
            candidate(scope, element_text(link), href, level)
        });

    dedup_by_url(candidates)
}

fn candidate(scope: &CategoryScope, title: String, href: &str, level: Level) -> Option<CategoryNode> {
    let url = match scope.accept(href) {
        Some(url) => url,
        None => {
            tracing::trace!("Rejected {} link '{}'", level, href);
            return None;
        }
    };

    if title.is_empty() {
        tracing::trace!("Rejected {} link {} with empty title", level, url);
        return None;
    }

    Some(CategoryNode { title, url, level })
}

fn dedup_by_url(candidates: impl Iterator<Item = CategoryNode>) -> Vec<CategoryNode> {
    let mut seen = HashSet::new();
    candidates
        .filter(|node| seen.insert(node.url.clone()))
        .collect()
}
