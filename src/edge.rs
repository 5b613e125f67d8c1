use crate::label::Label;
use crate::{CharType, NodeID};

/// A labeled transition from a parent node to `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    label: Label,
    dest: NodeID,
}

impl Edge {
    pub fn new(label: Label, dest: NodeID) -> Self {
        Self { label, dest }
    }

    /// The node this edge leads to.
    pub fn dest(&self) -> NodeID {
        self.dest
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn leading_char(&self) -> Option<CharType> {
        self.label.first()
    }

    /// Points the edge at another node, keeping its label.
    pub fn set_dest(&mut self, dest: NodeID) {
        self.dest = dest;
    }
}
