//! Node, edge and reference-propagation core of a generalized suffix tree.
//!
//! A generalized suffix tree indexes every substring of a set of documents.
//! This crate holds the part of such a tree that answers "which documents
//! contain the substring ending at this node": the per-node document
//! references, the edge collections, the suffix links, and the algorithms
//! over them. Deciding where to split edges and when to create nodes is left
//! to an external builder (e.g. Ukkonen's algorithm) which drives the
//! [`SuffixArena`] through its accessors.
//!
//! Nodes live in an arena and refer to each other by [`NodeID`]. Parents own
//! their children through edges; suffix links are plain ids and never take
//! part in ownership or aggregation, so no reference cycles can form.
//!
//! The intended lifecycle has two phases. During construction the builder
//! creates nodes, wires edges and suffix links, and records occurrences with
//! [`SuffixArena::add_ref`], which back-fills the reference along the suffix
//! chain. Once all input is consumed the builder computes counts once and
//! serves queries.
//!
//! # Examples
//!
//! ```
//! use gst_node::{Label, SuffixArena};
//!
//! let mut tree = SuffixArena::new();
//! let root = tree.root();
//! let n = tree.create_node();
//! tree.connect(root, Label::from_slice(&[7, 8]), n).unwrap();
//!
//! tree.add_ref(n, 1, 0);
//! tree.add_ref(n, 2, 0);
//! assert_eq!(tree.data(root).len(), 2);
//!
//! tree.compute_and_cache_count(root);
//! assert_eq!(tree.result_count(n), Ok(2));
//! ```

mod arena;
mod config;
mod edge;
mod edge_bag;
mod error;
mod frozen;
mod label;
mod node;

use std::fmt;

pub use arena::{RefOutcome, SuffixArena};
pub use config::TreeConfig;
pub use edge::Edge;
pub use edge_bag::EdgeBag;
pub use error::{Result, TreeError};
pub use frozen::FrozenArena;
pub use label::Label;
pub use node::Node;

/// Index of a document inserted into the tree.
pub type DocIndex = u32;
/// Origin offset recorded together with a document index.
pub type Offset = u32;
/// Symbol type of the indexed strings.
pub type CharType = u64;

/// Handle of a node inside a [`SuffixArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeID(u32);

impl NodeID {
    /// The root node, present in every arena.
    pub const ROOT: NodeID = NodeID(0);

    /// Largest number of nodes an arena can address.
    pub const MAX_NODES: usize = u32::MAX as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::MAX_NODES);
        NodeID(index as u32)
    }

    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
