//! In-memory graph store.
//!
//! Holds nodes and edges in RAM; everything is **lost when the process
//! exits**. The JSONL backend reuses this type as its working copy.

use super::import::{build_graph, ImportRow, ImportSummary};
use super::GraphStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use dagscope_core::domain::{Edge, Node, NodeId, Position, RawGraph};

/// Ephemeral graph store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `graph`
    #[must_use]
    pub fn from_graph(graph: RawGraph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn snapshot(&self) -> RawGraph {
        RawGraph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub(crate) fn set_position(&mut self, id: &NodeId, position: Position) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id == *id)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))?;
        node.position = Some(position);
        Ok(())
    }

    pub(crate) fn replace_with(&mut self, rows: &[ImportRow]) -> ImportSummary {
        let (graph, summary) = build_graph(rows);
        *self = Self::from_graph(graph);
        summary
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[async_trait]
impl GraphStore for InMemoryStore {
    async fn fetch_graph(&self) -> Result<RawGraph> {
        Ok(self.snapshot())
    }

    async fn save_position(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.set_position(id, position)
    }

    async fn import(&mut self, rows: Vec<ImportRow>) -> Result<ImportSummary> {
        let summary = self.replace_with(&rows);
        tracing::info!(nodes = summary.nodes, edges = summary.edges, "Imported graph");
        Ok(summary)
    }

    async fn reset(&mut self) -> Result<()> {
        self.clear();
        tracing::info!("Reset graph store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DependsOn;

    fn rows() -> Vec<ImportRow> {
        vec![
            ImportRow {
                object: "orders".to_string(),
                ..Default::default()
            },
            ImportRow {
                object: "daily_sales".to_string(),
                depends_on: DependsOn::List(vec!["orders".to_string()]),
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn import_replaces_previous_graph() {
        let mut store = InMemoryStore::from_graph(RawGraph {
            nodes: vec![Node::new("stale")],
            edges: vec![],
        });

        let summary = store.import(rows()).await.unwrap();
        assert_eq!(summary.nodes, 2);

        let graph = store.fetch_graph().await.unwrap();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["orders", "daily_sales"]);
        assert_eq!(graph.edges, vec![Edge::new("orders", "daily_sales")]);
    }

    #[tokio::test]
    async fn save_position_updates_node() {
        let mut store = InMemoryStore::new();
        store.import(rows()).await.unwrap();

        let id = NodeId::from("orders");
        store.save_position(&id, Position::new(3.0, 4.0)).await.unwrap();

        let graph = store.fetch_graph().await.unwrap();
        assert_eq!(graph.nodes[0].position, Some(Position::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn save_position_for_unknown_node_fails() {
        let mut store = InMemoryStore::new();
        let result = store
            .save_position(&NodeId::from("ghost"), Position::default())
            .await;
        assert!(matches!(result, Err(Error::NodeNotFound(_))));
    }

    #[tokio::test]
    async fn reset_empties_store() {
        let mut store = InMemoryStore::new();
        store.import(rows()).await.unwrap();
        store.reset().await.unwrap();

        let graph = store.fetch_graph().await.unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
