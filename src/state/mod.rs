//! State module for tracking walk progress
//!
//! # Components
//!
//! - `NodeState`: where a single URL is in the traversal (unvisited, visiting, finished)
//! - `TraversalContext`: the per-walk visited sets, owned by one walk and passed
//!   by reference through the level handlers

mod node_state;
mod traversal;

// Re-export main types
pub use node_state::NodeState;
pub use traversal::TraversalContext;
