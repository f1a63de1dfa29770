use smallvec::SmallVec;

use crate::capture::Scope;
use crate::error::{Error, Result};

/// Index of a node in the tree's flat store.
pub type NodeId = usize;

/// One stored scope with its tree bookkeeping.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    /// The scope itself.
    pub scope: Scope,
    /// Parent node id; the root is its own parent.
    pub parent: NodeId,
    n_children: usize,
}

impl ScopeNode {
    /// Number of transitive descendants of this node.
    pub fn descendant_count(&self) -> usize {
        self.n_children
    }
}

/// Scope tree built in-order from the hierarchy declaration stream.
///
/// Nodes live in a flat vector in insertion order, and `push` bumps the
/// descendant count of every ancestor on the current path — not only the
/// immediate parent. Because the stream is depth-first and nodes append
/// immediately, a node and its whole subtree occupy the contiguous index
/// range `[id, id + 1 + descendant_count)`, which turns "all descendants"
/// into slice construction. Do not reduce the increment to the immediate
/// parent; the contiguity depends on it.
#[derive(Debug, Default)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
    path: SmallVec<[NodeId; 16]>,
}

impl ScopeTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no scope has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` while at least one scope is open.
    pub fn has_open_scope(&self) -> bool {
        !self.path.is_empty()
    }

    /// Adds a scope under the currently open scope and opens it.
    ///
    /// With no open scope, the new node becomes the root; a second root
    /// attempt is fatal.
    pub fn push(&mut self, scope: Scope) -> Result<NodeId> {
        let id = self.nodes.len();
        let parent = match self.path.last() {
            Some(&parent) => parent,
            None if self.nodes.is_empty() => id,
            None => {
                return Err(Error::MultipleRoots { name: scope.name });
            }
        };
        for &ancestor in &self.path {
            self.nodes[ancestor].n_children += 1;
        }
        self.nodes.push(ScopeNode {
            scope,
            parent,
            n_children: 0,
        });
        self.path.push(id);
        Ok(id)
    }

    /// Closes the innermost open scope. Tolerates trailing end-scope records
    /// by ignoring a pop on an empty path.
    pub fn pop(&mut self) {
        self.path.pop();
    }

    /// The innermost open scope, if any.
    pub fn current_mut(&mut self) -> Option<&mut Scope> {
        let &id = self.path.last()?;
        Some(&mut self.nodes[id].scope)
    }

    /// Ancestor path of the innermost open scope, `root/…/current/` with a
    /// trailing separator. Empty when no scope is open.
    pub fn current_context(&self) -> String {
        let mut context = String::new();
        for &id in &self.path {
            context.push_str(&self.nodes[id].scope.name);
            context.push('/');
        }
        context
    }

    /// Indexed node lookup.
    pub fn get(&self, id: NodeId) -> Result<&ScopeNode> {
        self.nodes.get(id).ok_or(Error::NodeIndex {
            index: id,
            len: self.nodes.len(),
        })
    }

    /// All transitive descendants of `id`, in depth-first declaration order.
    pub fn all_children(&self, id: NodeId) -> Result<&[ScopeNode]> {
        let node = self.get(id)?;
        let end = id + 1 + node.n_children;
        debug_assert!(end <= self.nodes.len());
        Ok(&self.nodes[id + 1..end])
    }
}
