/// Node state definitions for tracking traversal progress
use std::fmt;

/// Represents where a category-tree URL is in the traversal
///
/// Transitions are `Unvisited -> Visiting -> {CategoryNoLeaf, LeafScraped}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Not yet reached on any path
    Unvisited,

    /// Loaded and being classified
    Visiting,

    // ===== Terminal States =====
    /// A hub whose children were all explored, or a branch that yielded nothing
    CategoryNoLeaf,

    /// A leaf listing whose records were extracted and emitted
    LeafScraped,
}

impl NodeState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CategoryNoLeaf | Self::LeafScraped)
    }

    /// Returns true if moving from `self` to `next` follows the state machine
    pub fn can_transition_to(&self, next: NodeState) -> bool {
        matches!(
            (self, next),
            (Self::Unvisited, Self::Visiting)
                | (Self::Visiting, Self::CategoryNoLeaf)
                | (Self::Visiting, Self::LeafScraped)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Visiting => "visiting",
            Self::CategoryNoLeaf => "category_no_leaf",
            Self::LeafScraped => "leaf_scraped",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
