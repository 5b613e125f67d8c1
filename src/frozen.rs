use std::collections::HashSet;

use crate::arena::SuffixArena;
use crate::edge::Edge;
use crate::node::Node;
use crate::{CharType, DocIndex, NodeID};

/// A finished tree in its query phase.
///
/// Only [`SuffixArena::freeze`] builds one, after recounting every subtree,
/// and no mutation is reachable through it, so cached counts cannot go
/// stale. [`into_inner`](Self::into_inner) hands the arena back for further
/// construction.
#[derive(Debug, Clone)]
pub struct FrozenArena {
    arena: SuffixArena,
}

impl FrozenArena {
    pub(crate) fn new(arena: SuffixArena) -> Self {
        Self { arena }
    }

    pub fn root(&self) -> NodeID {
        self.arena.root()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Read-only access to the underlying arena.
    pub fn arena(&self) -> &SuffixArena {
        &self.arena
    }

    pub fn node(&self, node: NodeID) -> &Node {
        self.arena.node(node)
    }

    pub fn get_edge(&self, node: NodeID, ch: CharType) -> Option<&Edge> {
        self.arena.get_edge(node, ch)
    }

    pub fn transition(&self, node: NodeID, ch: CharType) -> Option<NodeID> {
        self.arena.transition(node, ch)
    }

    pub fn suffix(&self, node: NodeID) -> Option<NodeID> {
        self.arena.suffix(node)
    }

    pub fn contains(&self, node: NodeID, index: DocIndex) -> bool {
        self.arena.contains(node, index)
    }

    pub fn data(&self, node: NodeID) -> HashSet<DocIndex> {
        self.arena.data(node)
    }

    /// Number of distinct documents in the subtree of `node`.
    pub fn result_count(&self, node: NodeID) -> usize {
        let count = self.arena.node(node).cached_count();
        debug_assert!(count.is_some(), "frozen node {node} without a count");
        count.unwrap_or_default()
    }

    /// Returns the arena for further construction. Counts stay as computed
    /// and go stale with the next mutation.
    pub fn into_inner(self) -> SuffixArena {
        self.arena
    }
}
