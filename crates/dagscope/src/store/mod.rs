//! Graph store abstraction for dagscope.
//!
//! The view engine never talks to storage directly. Everything it needs from
//! the outside world goes through [`GraphStore`]:
//!
//! - **Graph source**: [`GraphStore::fetch_graph`]
//! - **Position sink**: [`GraphStore::save_position`]
//! - **Bulk import**: [`GraphStore::import`]
//! - **Reset**: [`GraphStore::reset`]
//!
//! Two backends are provided:
//!
//! - **In-memory**: ephemeral, useful for tests and one-off sessions
//! - **JSONL**: file-backed, one node or edge record per line
//!
//! # Failure Semantics
//!
//! A failed mutation leaves the store exactly as it was. The JSONL backend
//! applies changes to a copy, writes it atomically and only then swaps it in.
//!
//! # Example
//!
//! ```no_run
//! use dagscope::store::{create_store, StoreBackend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let (store, warnings) = create_store(StoreBackend::InMemory).await?;
//!     assert!(warnings.is_empty());
//!
//!     let graph = store.fetch_graph().await?;
//!     println!("{} nodes", graph.nodes.len());
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use async_trait::async_trait;
use dagscope_core::domain::{NodeId, Position, RawGraph};
use std::path::PathBuf;

mod import;
pub mod in_memory;
pub mod jsonl;
mod schedule;

pub use import::{DependsOn, ImportRow, ImportSummary};
pub use in_memory::InMemoryStore;
pub use jsonl::{read_records, JsonlStore, StoreWarning};

/// Storage for one dependency graph.
///
/// Implementations must be `Send + Sync` so an `App` can hold them across
/// await points.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Fetch the full graph, with any stored positions attached to nodes.
    async fn fetch_graph(&self) -> Result<RawGraph>;

    /// Persist the position of one node.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if the node is not stored.
    async fn save_position(&mut self, id: &NodeId, position: Position) -> Result<()>;

    /// Replace all stored data with the given rows.
    async fn import(&mut self, rows: Vec<ImportRow>) -> Result<ImportSummary>;

    /// Remove all nodes and edges.
    async fn reset(&mut self) -> Result<()>;
}

/// Available store backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Ephemeral in-process store
    InMemory,
    /// File-backed store at the given path
    Jsonl(PathBuf),
}

/// Create a store for the given backend.
///
/// Returns the store together with any non-fatal warnings raised while
/// loading existing data.
///
/// # Errors
///
/// Returns an error if an existing data file cannot be read.
pub async fn create_store(backend: StoreBackend) -> Result<(Box<dyn GraphStore>, Vec<StoreWarning>)> {
    match backend {
        StoreBackend::InMemory => Ok((Box::new(InMemoryStore::new()), Vec::new())),
        StoreBackend::Jsonl(path) => {
            let (store, warnings) = JsonlStore::open(path).await?;
            Ok((Box::new(store), warnings))
        }
    }
}
