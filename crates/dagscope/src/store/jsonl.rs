//! JSONL-backed graph store.
//!
//! The data file holds one record per line, tagged by kind:
//!
//! ```text
//! {"kind":"node","id":"orders","label":"orders","owner":"sales"}
//! {"kind":"edge","source":"orders","target":"daily_sales"}
//! ```
//!
//! # Loading
//!
//! Loading is resilient: blank lines are skipped and lines that fail to
//! parse are skipped with a [`StoreWarning`]. A missing file is an empty
//! graph.
//!
//! # Writing
//!
//! Every mutation is applied to a copy of the current data, written to a
//! temporary file next to the data file and renamed over it. The in-memory
//! copy is replaced only after the rename succeeds, so a failed write leaves
//! both the file and the store unchanged.

use super::import::{ImportRow, ImportSummary};
use super::in_memory::InMemoryStore;
use super::GraphStore;
use crate::error::Result;
use async_trait::async_trait;
use dagscope_core::domain::{Edge, Node, NodeId, Position, RawGraph};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Non-fatal problems found while reading a JSONL file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreWarning {
    /// A line could not be parsed
    ///
    /// **Effect**: the line is skipped.
    MalformedRecord {
        /// 1-based line number
        line_number: usize,
        /// Parser error
        error: String,
    },
}

impl StoreWarning {
    /// Line number the warning refers to
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedRecord { line_number, .. } => *line_number,
        }
    }

    /// Human-readable description of the warning
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedRecord { line_number, error } => {
                format!("line {line_number}: malformed record: {error}")
            }
        }
    }
}

/// One line of the data file
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    Node(Node),
    Edge(Edge),
}

/// Read every parseable record of type `T` from a JSONL file.
///
/// Blank lines are ignored; lines that fail to parse are reported as
/// warnings and skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn read_records<T: DeserializeOwned>(
    path: &Path,
) -> Result<(Vec<T>, Vec<StoreWarning>)> {
    let content = fs::read_to_string(path).await?;
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), line_number, error = %e, "Skipping malformed record");
                warnings.push(StoreWarning::MalformedRecord {
                    line_number,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok((records, warnings))
}

/// File-backed graph store
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    data: InMemoryStore,
}

impl JsonlStore {
    /// Open the store at `path`, loading existing data if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<(Self, Vec<StoreWarning>)> {
        let path = path.into();
        let (records, warnings) = match read_records::<Record>(&path).await {
            Ok(loaded) => loaded,
            Err(crate::error::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No data file yet, starting empty");
                (Vec::new(), Vec::new())
            }
            Err(e) => return Err(e),
        };

        let mut graph = RawGraph::default();
        for record in records {
            match record {
                Record::Node(node) => graph.nodes.push(node),
                Record::Edge(edge) => graph.edges.push(edge),
            }
        }

        tracing::debug!(
            path = %path.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            warnings = warnings.len(),
            "Opened JSONL store"
        );

        let store = Self {
            path,
            data: InMemoryStore::from_graph(graph),
        };
        Ok((store, warnings))
    }

    /// Path of the data file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the data, persist it, then commit.
    async fn commit<T>(&mut self, change: impl FnOnce(&mut InMemoryStore) -> Result<T>) -> Result<T> {
        let mut next = self.data.clone();
        let value = change(&mut next)?;
        write_atomic(&self.path, &next).await?;
        self.data = next;
        Ok(value)
    }
}

/// Write all records to a temp file, then rename it over `path`.
async fn write_atomic(path: &Path, data: &InMemoryStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("jsonl.tmp");
    let file = File::create(&temp_path).await?;
    let mut writer = BufWriter::new(file);

    let nodes = data.nodes().iter().map(RecordRef::Node);
    let edges = data.edges().iter().map(RecordRef::Edge);
    for record in nodes.chain(edges) {
        let line = serde_json::to_string(&record)?;
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    writer.into_inner().sync_all().await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Borrowed twin of [`Record`] used for writing
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RecordRef<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

#[async_trait]
impl GraphStore for JsonlStore {
    async fn fetch_graph(&self) -> Result<RawGraph> {
        Ok(self.data.snapshot())
    }

    async fn save_position(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.commit(|data| data.set_position(id, position)).await
    }

    async fn import(&mut self, rows: Vec<ImportRow>) -> Result<ImportSummary> {
        let summary = self.commit(|data| Ok(data.replace_with(&rows))).await?;
        tracing::info!(
            path = %self.path.display(),
            nodes = summary.nodes,
            edges = summary.edges,
            "Imported graph"
        );
        Ok(summary)
    }

    async fn reset(&mut self) -> Result<()> {
        self.commit(|data| {
            data.clear();
            Ok(())
        })
        .await?;
        tracing::info!(path = %self.path.display(), "Reset graph store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::DependsOn;
    use tempfile::tempdir;

    fn rows() -> Vec<ImportRow> {
        vec![
            ImportRow {
                object: "a".to_string(),
                owner: Some("ops".to_string()),
                ..Default::default()
            },
            ImportRow {
                object: "b".to_string(),
                depends_on: DependsOn::Joined("a".to_string()),
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let (store, warnings) = JsonlStore::open(dir.path().join("graph.jsonl")).await.unwrap();

        assert!(warnings.is_empty());
        assert!(store.fetch_graph().await.unwrap().nodes.is_empty());
    }

    #[tokio::test]
    async fn import_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.jsonl");

        let (mut store, _) = JsonlStore::open(&path).await.unwrap();
        store.import(rows()).await.unwrap();
        store
            .save_position(&NodeId::from("b"), Position::new(7.0, -2.0))
            .await
            .unwrap();

        let (reopened, warnings) = JsonlStore::open(&path).await.unwrap();
        assert!(warnings.is_empty());
        let graph = reopened.fetch_graph().await.unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].owner.as_deref(), Some("ops"));
        assert_eq!(graph.nodes[1].position, Some(Position::new(7.0, -2.0)));
        assert_eq!(graph.edges, vec![Edge::new("a", "b")]);
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped_with_warnings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.jsonl");
        let content = "\
{\"kind\":\"node\",\"id\":\"a\"}

not json
{\"kind\":\"widget\",\"id\":\"w\"}
{\"kind\":\"edge\",\"source\":\"a\",\"target\":\"a\"}
";
        std::fs::write(&path, content).unwrap();

        let (store, warnings) = JsonlStore::open(&path).await.unwrap();
        let lines: Vec<_> = warnings.iter().map(StoreWarning::line_number).collect();
        assert_eq!(lines, vec![3, 4]);

        let graph = store.fetch_graph().await.unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges.len(), 1);
    }

    #[tokio::test]
    async fn failed_position_save_changes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.jsonl");
        let (mut store, _) = JsonlStore::open(&path).await.unwrap();
        store.import(rows()).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let result = store
            .save_position(&NodeId::from("ghost"), Position::new(1.0, 1.0))
            .await;

        assert!(matches!(result, Err(Error::NodeNotFound(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn reset_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("graph.jsonl");
        let (mut store, _) = JsonlStore::open(&path).await.unwrap();
        store.import(rows()).await.unwrap();
        store.reset().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert!(!path.with_extension("jsonl.tmp").exists());
    }
}
