//! Error types for the suffix tree core.

use thiserror::Error;

use crate::NodeID;

/// Errors raised by the arena and its nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `result_count` was read before any count was computed for the node.
    #[error("result count of node {node} read before compute_and_cache_count")]
    InvalidState { node: NodeID },

    /// An edge label with no leading character cannot be keyed in an edge bag.
    #[error("cannot connect node {parent} with an empty edge label")]
    EmptyLabel { parent: NodeID },

    /// Configuration rejected by `TreeConfig::validate`.
    #[error("invalid tree configuration: {0}")]
    Config(String),
}

/// Result type for suffix tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
