//! Configuration management for dagscope.
//!
//! Configuration lives in `.dagscope/config.yaml`, found by walking up from
//! the working directory:
//!
//! ```yaml
//! store:
//!   backend: jsonl
//!   data_file: .dagscope/graph.jsonl
//! ```

use crate::error::{Error, Result};
use crate::store::StoreBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the dagscope directory
pub const DAGSCOPE_DIR_NAME: &str = ".dagscope";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the graph data file
pub const GRAPH_FILE_NAME: &str = "graph.jsonl";

/// Maximum directory depth to traverse when searching for the dagscope root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Backend name for the ephemeral in-memory store
pub const BACKEND_MEMORY: &str = "memory";

/// Backend name for the file-backed JSONL store
pub const BACKEND_JSONL: &str = "jsonl";

/// Configuration file structure for dagscope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DagscopeConfig {
    /// Store configuration
    pub store: StoreConfig,
}

/// Store configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store backend type ("jsonl" or "memory")
    pub backend: String,

    /// Path to the data file, relative to the repository root
    pub data_file: String,
}

impl StoreConfig {
    /// Resolve this configuration into a [`StoreBackend`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an unknown backend name.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StoreBackend> {
        match self.backend.as_str() {
            BACKEND_MEMORY => Ok(StoreBackend::InMemory),
            BACKEND_JSONL => Ok(StoreBackend::Jsonl(root_dir.join(&self.data_file))),
            other => Err(Error::Config(format!(
                "Unknown store backend '{other}' (expected '{BACKEND_JSONL}' or '{BACKEND_MEMORY}')"
            ))),
        }
    }
}

impl DagscopeConfig {
    /// Create a configuration for the given backend
    pub fn new(backend: &str) -> Self {
        Self {
            store: StoreConfig {
                backend: backend.to_string(),
                data_file: format!("{DAGSCOPE_DIR_NAME}/{GRAPH_FILE_NAME}"),
            },
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for DagscopeConfig {
    fn default() -> Self {
        Self::new(BACKEND_JSONL)
    }
}

/// Find the directory containing `.dagscope/`, starting at `start` and
/// walking up through its parents.
pub fn find_dagscope_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_TRAVERSAL_DEPTH)
        .find(|dir| dir.join(DAGSCOPE_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
}

/// Check if a directory has been initialized with dagscope
pub fn is_initialized(dir: &Path) -> bool {
    dir.join(DAGSCOPE_DIR_NAME).is_dir()
}
