//! Error types for dagscope-core operations.

use crate::domain::NodeId;
use thiserror::Error;

/// The error type for dagscope-core operations.
///
/// Traversals and set computations are total over a loaded graph, so the only
/// failure the core reports is an explicit lookup of a node that is not there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The node is not part of the loaded graph.
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),
}

/// A specialized Result type for dagscope-core operations.
pub type Result<T> = std::result::Result<T, Error>;
