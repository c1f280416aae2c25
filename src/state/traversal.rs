use crate::state::NodeState;
use std::collections::{HashMap, HashSet};

/// Visited-URL bookkeeping for one walk
///
/// Two sets are kept, mirroring how the walker treats each level:
/// - `category_visited`: L1 and L2 URLs that have been entered as hubs
/// - `leaf_scraped`: URLs whose listing has been extracted and emitted
///
/// L3 nodes are only ever checked against `leaf_scraped`, since they are
/// treated as potential leaves and never as further hubs. Dedup is by URL
/// identity, so the category tree is navigated as a DAG: the first path to
/// reach a node wins and later paths are no-ops.
#[derive(Debug, Default)]
pub struct TraversalContext {
    category_visited: HashSet<String>,
    leaf_scraped: HashSet<String>,
    states: HashMap<String, NodeState>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_category_visited(&self, url: &str) -> bool {
        self.category_visited.contains(url)
    }

    pub fn is_leaf_scraped(&self, url: &str) -> bool {
        self.leaf_scraped.contains(url)
    }

    /// Records `url` as entered as a category page
    ///
    /// Returns false if it was already recorded, in which case the caller
    /// must skip it.
    pub fn mark_category_visited(&mut self, url: &str) -> bool {
        if !self.category_visited.insert(url.to_string()) {
            return false;
        }
        self.advance(url, NodeState::Visiting);
        true
    }

    /// Records that the listing at `url` has been extracted
    ///
    /// Returns false if it was already recorded.
    pub fn mark_leaf_scraped(&mut self, url: &str) -> bool {
        if !self.leaf_scraped.insert(url.to_string()) {
            return false;
        }
        self.states.remove(url);
        true
    }

    /// Moves an unvisited URL into `Visiting` without entering it as a category
    pub fn begin_visit(&mut self, url: &str) {
        self.advance(url, NodeState::Visiting);
    }

    /// Closes a visit that did not end in a scraped leaf
    pub fn finish_without_leaf(&mut self, url: &str) {
        self.advance(url, NodeState::CategoryNoLeaf);
    }

    /// Current state of `url`
    pub fn state(&self, url: &str) -> NodeState {
        if self.leaf_scraped.contains(url) {
            return NodeState::LeafScraped;
        }
        self.states
            .get(url)
            .copied()
            .unwrap_or(NodeState::Unvisited)
    }

    pub fn categories_visited(&self) -> usize {
        self.category_visited.len()
    }

    pub fn leaves_scraped(&self) -> usize {
        self.leaf_scraped.len()
    }

    fn advance(&mut self, url: &str, next: NodeState) -> bool {
        let current = self.state(url);
        if !current.can_transition_to(next) {
            tracing::trace!("Ignoring {} -> {} for {}", current, next, url);
            return false;
        }
        self.states.insert(url.to_string(), next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.tecnomat.it/it/c/bagno";

    #[test]
    fn test_new_context_is_empty() {
        let ctx = TraversalContext::new();
        assert_eq!(ctx.state(URL), NodeState::Unvisited);
        assert_eq!(ctx.categories_visited(), 0);
        assert_eq!(ctx.leaves_scraped(), 0);
    }

    #[test]
    fn test_mark_category_visited_once() {
        let mut ctx = TraversalContext::new();
        assert!(ctx.mark_category_visited(URL));
        assert!(!ctx.mark_category_visited(URL));
        assert!(ctx.is_category_visited(URL));
        assert_eq!(ctx.state(URL), NodeState::Visiting);
        assert_eq!(ctx.categories_visited(), 1);
    }

    #[test]
    fn test_category_then_leaf() {
        let mut ctx = TraversalContext::new();
        ctx.mark_category_visited(URL);
        assert!(ctx.mark_leaf_scraped(URL));
        assert!(!ctx.mark_leaf_scraped(URL));
        assert_eq!(ctx.state(URL), NodeState::LeafScraped);
        assert!(ctx.is_category_visited(URL));
        assert!(ctx.is_leaf_scraped(URL));
    }

    #[test]
    fn test_hub_finishes_without_leaf() {
        let mut ctx = TraversalContext::new();
        ctx.mark_category_visited(URL);
        ctx.finish_without_leaf(URL);
        assert_eq!(ctx.state(URL), NodeState::CategoryNoLeaf);

        // A later visit does not reopen a finished node
        ctx.begin_visit(URL);
        assert_eq!(ctx.state(URL), NodeState::CategoryNoLeaf);
    }

    #[test]
    fn test_leaf_visit_without_category_mark() {
        let mut ctx = TraversalContext::new();
        ctx.begin_visit(URL);
        assert_eq!(ctx.state(URL), NodeState::Visiting);
        assert!(!ctx.is_category_visited(URL));
        ctx.mark_leaf_scraped(URL);
        assert_eq!(ctx.state(URL), NodeState::LeafScraped);
    }

    #[test]
    fn test_finish_requires_visit() {
        let mut ctx = TraversalContext::new();
        ctx.finish_without_leaf(URL);
        assert_eq!(ctx.state(URL), NodeState::Unvisited);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let mut first = TraversalContext::new();
        first.mark_category_visited(URL);

        let second = TraversalContext::new();
        assert!(!second.is_category_visited(URL));
    }
}
