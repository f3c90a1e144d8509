//! Implementation of the `init` command.
//!
//! Creates the `.dagscope/` directory with configuration, an empty graph
//! data file and a `.gitignore`.

use crate::config::{
    is_initialized, DagscopeConfig, BACKEND_JSONL, BACKEND_MEMORY, CONFIG_FILE_NAME, DAGSCOPE_DIR_NAME,
    GRAPH_FILE_NAME,
};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the gitignore file within .dagscope
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created dagscope directory
    pub dagscope_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created graph data file
    pub graph_file: PathBuf,
    /// Store backend written to the config
    pub backend: String,
}

/// Validate a store backend name.
///
/// Note: Expects pre-trimmed input.
pub fn validate_backend(backend: &str) -> Result<()> {
    if backend == BACKEND_JSONL || backend == BACKEND_MEMORY {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Backend must be '{BACKEND_JSONL}' or '{BACKEND_MEMORY}', got '{backend}'"
        )))
    }
}

/// Initialize a new dagscope repository in the given directory.
///
/// # Arguments
///
/// * `base_dir` - The base directory where `.dagscope/` will be created
/// * `backend` - Optional store backend (defaults to "jsonl")
///
/// # Errors
///
/// Returns an error if:
/// - The `.dagscope/` directory already exists
/// - The backend is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, backend: Option<&str>) -> Result<InitResult> {
    let backend = backend.unwrap_or(BACKEND_JSONL).trim();
    validate_backend(backend)?;

    if is_initialized(base_dir) {
        return Err(Error::Config(format!(
            "Dagscope is already initialized in this directory. Found existing '{DAGSCOPE_DIR_NAME}'"
        )));
    }

    let dagscope_dir = base_dir.join(DAGSCOPE_DIR_NAME);
    fs::create_dir_all(&dagscope_dir).await?;

    let config_file = dagscope_dir.join(CONFIG_FILE_NAME);
    DagscopeConfig::new(backend).save(&config_file).await?;

    let graph_file = dagscope_dir.join(GRAPH_FILE_NAME);
    fs::write(&graph_file, "").await?;

    let gitignore_content = "\
# Temporary files left behind by interrupted writes
*.tmp
";
    fs::write(dagscope_dir.join(GITIGNORE_FILE_NAME), gitignore_content).await?;

    tracing::debug!(dir = %dagscope_dir.display(), backend, "Initialized dagscope");

    Ok(InitResult {
        dagscope_dir,
        config_file,
        graph_file,
        backend: backend.to_string(),
    })
}
