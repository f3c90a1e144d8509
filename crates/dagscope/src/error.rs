//! Error types for dagscope operations.

use dagscope_core::domain::NodeId;
use std::io;
use thiserror::Error;

/// The error type for dagscope operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.dagscope/` directory in the working directory or its parents.
    #[error("Not a dagscope repository (or any parent directory). Run 'dagscope init' first.")]
    NotInitialized,

    /// Store error.
    #[error("Store error: {0}")]
    Store(String),

    /// Node not found in the store.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Error from the view engine.
    #[error(transparent)]
    Core(#[from] dagscope_core::Error),
}

/// A specialized Result type for dagscope operations.
pub type Result<T> = std::result::Result<T, Error>;
