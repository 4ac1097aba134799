//! Tree construction errors.

use crate::kind::NodeType;

/// Error raised while building or loading a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Tree document is not valid JSON or does not match the schema.
    #[error("Invalid tree document: {0}")]
    Json(#[from] serde_json::Error),

    /// No root node was started.
    #[error("Tree has no root node")]
    Empty,

    /// A second top-level node was started after the root was closed.
    #[error("Tree already has a root node, cannot start {0}")]
    MultipleRoots(NodeType),

    /// `finish_node` was called with no open node.
    #[error("No open node to finish")]
    UnbalancedFinish,

    /// The tree was finished while a node was still open.
    #[error("Node {0} was never finished")]
    UnclosedNode(NodeType),

    /// A token was added outside of any node.
    #[error("Token {0} has no parent node")]
    TokenWithoutParent(NodeType),

    /// A token's text does not match the source at the builder's cursor.
    #[error("Token {kind} expected {expected:?} at offset {offset}")]
    TokenMismatch {
        kind: NodeType,
        offset: usize,
        expected: String,
    },

    /// A node span is outside the source, inverted, or misaligned.
    #[error("Invalid span {start}..{end} for {kind}: {reason}")]
    InvalidSpan {
        kind: NodeType,
        start: usize,
        end: usize,
        reason: &'static str,
    },
}
