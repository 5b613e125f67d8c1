use std::collections::HashMap;

use crate::edge::Edge;
use crate::edge_bag::EdgeBag;
use crate::error::{Result, TreeError};
use crate::{CharType, DocIndex, NodeID, Offset};

/// A node of the tree.
///
/// `references` maps every document recorded directly at this node to the
/// offset it was recorded with; entries are never removed. `children` owns
/// the outgoing edges. `suffix_link` points at the node spelling this node's
/// string minus its first character; it is a plain id and never followed
/// when aggregating over a subtree.
///
/// `cached_count` is `None` until a recount reaches this node. It is not
/// invalidated by later mutations.
#[derive(Debug, Clone, Default)]
pub struct Node {
    references: HashMap<DocIndex, Offset>,
    children: EdgeBag,
    suffix_link: Option<NodeID>,
    cached_count: Option<usize>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_ref_capacity(capacity: usize) -> Self {
        Self {
            references: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Whether `index` is recorded at this node itself, descendants excluded.
    #[inline]
    pub fn contains(&self, index: DocIndex) -> bool {
        self.references.contains_key(&index)
    }

    /// The references recorded directly at this node.
    pub fn references(&self) -> &HashMap<DocIndex, Offset> {
        &self.references
    }

    /// Offset recorded for `index` at this node.
    pub fn offset_of(&self, index: DocIndex) -> Option<Offset> {
        self.references.get(&index).copied()
    }

    /// An existing reference whose `index + offset` equals that of the
    /// candidate. Such a candidate is dropped instead of recorded.
    pub(crate) fn colliding_ref(&self, index: DocIndex, offset: Offset) -> Option<(DocIndex, Offset)> {
        let sum = u64::from(index) + u64::from(offset);
        self.references
            .iter()
            .find(|(&k, &v)| u64::from(k) + u64::from(v) == sum)
            .map(|(&k, &v)| (k, v))
    }

    pub(crate) fn insert_ref(&mut self, index: DocIndex, offset: Offset) {
        self.references.insert(index, offset);
    }

    pub fn add_edge(&mut self, ch: CharType, edge: Edge) -> Option<Edge> {
        self.children.put(ch, edge)
    }

    pub fn get_edge(&self, ch: CharType) -> Option<&Edge> {
        self.children.get(ch)
    }

    pub fn get_edge_mut(&mut self, ch: CharType) -> Option<&mut Edge> {
        self.children.get_mut(ch)
    }

    pub fn edges(&self) -> &EdgeBag {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn suffix(&self) -> Option<NodeID> {
        self.suffix_link
    }

    pub fn set_suffix(&mut self, suffix: NodeID) {
        self.suffix_link = Some(suffix);
    }

    /// The count cached by the last recount that reached this node, if any.
    pub fn cached_count(&self) -> Option<usize> {
        self.cached_count
    }

    pub(crate) fn set_cached_count(&mut self, count: usize) {
        self.cached_count = Some(count);
    }

    /// `id` only labels the error.
    pub(crate) fn result_count(&self, id: NodeID) -> Result<usize> {
        self.cached_count.ok_or(TreeError::InvalidState { node: id })
    }
}
