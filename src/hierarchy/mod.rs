//! Scope hierarchy: tree construction from the declaration stream and
//! flattening of a selected subtree into a variable list.

mod loader;
mod tree;

pub use loader::read_hierarchy;
pub use tree::{NodeId, ScopeNode, ScopeTree};
