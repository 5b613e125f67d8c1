//! Arena configuration.
//!
//! Only sizing hints live here; none of them change what the tree computes.

use crate::error::{Result, TreeError};
use crate::NodeID;

/// Pre-allocation hints for a [`SuffixArena`](crate::SuffixArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of node slots reserved up front (root included).
    pub node_capacity: usize,
    /// Initial capacity of each node's reference map.
    pub ref_capacity: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            node_capacity: 2,
            ref_capacity: 0,
        }
    }
}

impl TreeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    #[must_use]
    pub fn with_ref_capacity(mut self, ref_capacity: usize) -> Self {
        self.ref_capacity = ref_capacity;
        self
    }

    /// Rejects capacities the arena could never address.
    pub fn validate(&self) -> Result<()> {
        if self.node_capacity > NodeID::MAX_NODES {
            return Err(TreeError::Config(format!(
                "node_capacity {} exceeds the addressable {} nodes",
                self.node_capacity,
                NodeID::MAX_NODES
            )));
        }
        Ok(())
    }

    /// Same as the input, with capacities clamped into the addressable range.
    pub(crate) fn clamped(self) -> Self {
        Self {
            node_capacity: self.node_capacity.min(NodeID::MAX_NODES),
            ..self
        }
    }
}
