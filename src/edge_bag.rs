use std::collections::hash_map::{self, HashMap};

use crate::edge::Edge;
use crate::CharType;

/// A node's outgoing edges keyed by the leading character of their label.
///
/// At most one edge is stored per leading character; `put` overwrites.
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeBag {
    edges: HashMap<CharType, Edge>,
}

impl EdgeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `edge` under `ch`, returning the edge it replaced.
    pub fn put(&mut self, ch: CharType, edge: Edge) -> Option<Edge> {
        debug_assert!(
            edge.leading_char().map_or(true, |first| first == ch),
            "edge keyed by {ch} but its label starts with {:?}",
            edge.leading_char()
        );
        self.edges.insert(ch, edge)
    }

    pub fn get(&self, ch: CharType) -> Option<&Edge> {
        self.edges.get(&ch)
    }

    pub fn get_mut(&mut self, ch: CharType) -> Option<&mut Edge> {
        self.edges.get_mut(&ch)
    }

    pub fn contains_key(&self, ch: CharType) -> bool {
        self.edges.contains_key(&ch)
    }

    pub fn values(&self) -> hash_map::Values<'_, CharType, Edge> {
        self.edges.values()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, CharType, Edge> {
        self.edges.iter()
    }

    pub fn chars(&self) -> impl Iterator<Item = CharType> + '_ {
        self.edges.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<'a> IntoIterator for &'a EdgeBag {
    type Item = (&'a CharType, &'a Edge);
    type IntoIter = hash_map::Iter<'a, CharType, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
