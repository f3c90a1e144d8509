//! Application context for CLI command execution.
//!
//! [`App`] owns the graph store and the current [`ViewSession`] snapshot, and
//! is the place where store failures are kept away from view state:
//!
//! - a failed reload keeps the previously loaded graph
//! - a failed position save is logged and otherwise ignored
//! - import and reset only reload after the store reports success
//!
//! # Example
//!
//! ```no_run
//! use dagscope::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} nodes", app.session().model().node_count());
//!     Ok(())
//! }
//! ```

use crate::config::{find_dagscope_root, DagscopeConfig, CONFIG_FILE_NAME, DAGSCOPE_DIR_NAME};
use crate::error::{Error, Result};
use crate::store::{
    create_store, read_records, GraphStore, ImportRow, ImportSummary, StoreBackend, StoreWarning,
};
use dagscope_core::domain::{NodeId, Position};
use dagscope_core::model::LoadWarning;
use dagscope_core::projector::View;
use dagscope_core::session::{ViewEvent, ViewSession};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    /// The graph store (trait object for polymorphism)
    store: Box<dyn GraphStore>,

    /// Current view snapshot
    session: ViewSession,

    /// Positions moved during this session, ahead of what the store holds
    positions: HashMap<NodeId, Position>,

    /// Path to the dagscope directory (.dagscope)
    dagscope_dir: PathBuf,

    /// Backend resolved from configuration, if opened from a directory
    backend: Option<StoreBackend>,

    /// Warnings raised when the store was opened
    store_warnings: Vec<StoreWarning>,

    /// Warnings raised by the last successful load
    load_warnings: Vec<LoadWarning>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("dagscope_dir", &self.dagscope_dir)
            .field("nodes", &self.session.model().node_count())
            .field("edges", &self.session.model().edge_count())
            .field("store", &"<dyn GraphStore>")
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.dagscope/`, loads configuration,
    /// opens the store and loads the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No dagscope repository is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The store cannot be opened or the first load fails
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_dagscope_root(working_dir).ok_or(Error::NotInitialized)?;
        let dagscope_dir = root_dir.join(DAGSCOPE_DIR_NAME);

        let config = DagscopeConfig::load(&dagscope_dir.join(CONFIG_FILE_NAME)).await?;
        let backend = config.store.to_backend(&root_dir)?;
        let (store, store_warnings) = create_store(backend.clone()).await?;

        let mut app = Self::with_store(store, dagscope_dir);
        app.backend = Some(backend);
        app.store_warnings = store_warnings;
        app.reload().await?;
        Ok(app)
    }

    /// Create an App around an existing store, with an empty graph loaded.
    ///
    /// Call [`App::reload`] to fetch the stored graph.
    pub fn with_store(store: Box<dyn GraphStore>, dagscope_dir: PathBuf) -> Self {
        Self {
            store,
            session: ViewSession::new(),
            positions: HashMap::new(),
            dagscope_dir,
            backend: None,
            store_warnings: Vec::new(),
            load_warnings: Vec::new(),
        }
    }

    /// Fetch the graph from the store and load it.
    ///
    /// Collapse and selection state is reset. On failure the previous graph
    /// and view state are kept untouched.
    ///
    /// # Errors
    ///
    /// Returns the store error if the fetch fails.
    pub async fn reload(&mut self) -> Result<&[LoadWarning]> {
        let raw = match self.store.fetch_graph().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Graph fetch failed, keeping previous graph");
                return Err(e);
            }
        };

        let (session, warnings) = self.session.load_raw(raw);
        for warning in &warnings {
            tracing::warn!(kind = warning.kind(), "{}", warning.description());
        }

        self.session = session;
        self.positions.clear();
        self.load_warnings = warnings;
        Ok(&self.load_warnings)
    }

    /// Current view snapshot
    pub fn session(&self) -> &ViewSession {
        &self.session
    }

    /// Apply a view event to the current snapshot
    pub fn apply(&mut self, event: &ViewEvent) {
        self.session = self.session.apply(event);
    }

    /// Renderable projection, including positions moved this session
    pub fn view(&self) -> View {
        self.session.project(Some(&self.positions))
    }

    /// Move a node and persist its new position.
    ///
    /// The position is recorded for [`App::view`] immediately. Persisting is
    /// fire-and-forget: a store failure is logged and reported as `Ok(false)`,
    /// leaving view state as it is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Core` if the node is not part of the loaded graph.
    pub async fn move_node(&mut self, id: &NodeId, position: Position) -> Result<bool> {
        self.session.model().require(id)?;
        self.positions.insert(id.clone(), position);

        match self.store.save_position(id, position).await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(node = %id, error = %e, "Failed to save node position");
                Ok(false)
            }
        }
    }

    /// Replace the stored graph with `rows`, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the import or the following reload fails. A failed
    /// import leaves the current graph loaded.
    pub async fn import_rows(&mut self, rows: Vec<ImportRow>) -> Result<ImportSummary> {
        let summary = self.store.import(rows).await?;
        self.reload().await?;
        Ok(summary)
    }

    /// Import a JSONL file of [`ImportRow`]s, then reload.
    ///
    /// Malformed lines are skipped and returned as warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the import fails.
    pub async fn import_file(&mut self, path: &Path) -> Result<(ImportSummary, Vec<StoreWarning>)> {
        let (rows, warnings) = read_records::<ImportRow>(path).await?;
        let summary = self.import_rows(rows).await?;
        Ok((summary, warnings))
    }

    /// Clear the store, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset or the following reload fails.
    pub async fn reset(&mut self) -> Result<()> {
        self.store.reset().await?;
        self.reload().await?;
        Ok(())
    }

    /// Path to the dagscope directory
    pub fn dagscope_dir(&self) -> &Path {
        &self.dagscope_dir
    }

    /// Backend the store was opened with
    pub fn backend(&self) -> Option<&StoreBackend> {
        self.backend.as_ref()
    }

    /// Warnings raised when the store was opened
    pub fn store_warnings(&self) -> &[StoreWarning] {
        &self.store_warnings
    }

    /// Warnings raised by the last successful load
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.load_warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_app_from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), None).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();
        assert!(app.dagscope_dir().ends_with(".dagscope"));
        assert!(app.session().model().is_empty());
    }

    #[tokio::test]
    async fn test_app_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), Some("memory")).await.unwrap();

        let sub_dir = temp_dir.path().join("pipelines").join("nightly");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();
        assert_eq!(app.dagscope_dir(), temp_dir.path().join(".dagscope"));
    }

    #[tokio::test]
    async fn test_app_from_uninitialized_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a dagscope repository"));
    }
}
