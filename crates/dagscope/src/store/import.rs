//! Bulk import rows and their conversion into a graph.
//!
//! One row describes one object (table, job, report) and the objects it
//! depends on. Each dependency becomes an edge `dependency -> object`.
//! A row's `next_execution` is derived from its `cron_expression` at import
//! time.

use super::schedule;
use chrono::{DateTime, Utc};
use dagscope_core::domain::{Edge, EdgeId, Node, NodeId, Position, RawGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Dependencies of an import row.
///
/// Accepts either a list of ids or a single `;`-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsOn {
    /// `["a", "b"]`
    List(Vec<String>),
    /// `"a;b"`
    Joined(String),
}

impl Default for DependsOn {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl DependsOn {
    /// Trimmed, non-empty dependency ids
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        let raw: Vec<&str> = match self {
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Joined(joined) => joined.split(';').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(NodeId::from)
            .collect()
    }
}

/// One row of a bulk import file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    /// Object id (also used as its label)
    pub object: String,

    /// Objects this one depends on
    #[serde(default)]
    pub depends_on: DependsOn,

    /// Owner
    #[serde(default)]
    pub owner: Option<String>,

    /// Schema
    #[serde(default)]
    pub schema: Option<String>,

    /// Server
    #[serde(default)]
    pub server: Option<String>,

    /// Creation date
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Last update
    #[serde(default)]
    pub last_update: Option<String>,

    /// Schedule expression
    #[serde(default)]
    pub cron_expression: Option<String>,

    /// Next execution, used only when the row has no cron expression
    #[serde(default)]
    pub next_execution: Option<String>,

    /// Initial x coordinate
    #[serde(default)]
    pub position_x: Option<f64>,

    /// Initial y coordinate
    #[serde(default)]
    pub position_y: Option<f64>,

    /// Business calendar
    #[serde(default)]
    pub calendar_string: Option<String>,
}

impl ImportRow {
    fn to_node(&self, now: DateTime<Utc>) -> Node {
        let mut node = Node::new(self.object.trim());
        node.owner = non_empty(self.owner.as_deref());
        node.schema = non_empty(self.schema.as_deref());
        node.server = non_empty(self.server.as_deref());
        node.creation_date = non_empty(self.creation_date.as_deref());
        node.last_update = non_empty(self.last_update.as_deref());
        node.cron_expression = non_empty(self.cron_expression.as_deref());
        node.next_execution = match &node.cron_expression {
            Some(expression) => schedule::next_execution(expression, now),
            None => non_empty(self.next_execution.as_deref()),
        };
        node.calendar = non_empty(self.calendar_string.as_deref());
        node.position = match (self.position_x, self.position_y) {
            (None, None) => None,
            (x, y) => Some(Position::new(x.unwrap_or(0.0), y.unwrap_or(0.0))),
        };
        node
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Nodes stored
    pub nodes: usize,
    /// Edges stored
    pub edges: usize,
    /// Rows that repeated an earlier object and replaced it
    pub replaced_rows: usize,
    /// Rows skipped for having no object id
    pub skipped_rows: usize,
    /// Repeated dependencies that were merged
    pub duplicate_edges: usize,
}

/// Build a graph from import rows.
///
/// A later row for the same object replaces the earlier node but keeps its
/// slot in the node order. Edges from every row are kept, deduplicated by
/// identity. Dependencies on objects that have no row of their own are kept
/// as-is; the view engine drops them when loading.
pub(crate) fn build_graph(rows: &[ImportRow]) -> (RawGraph, ImportSummary) {
    build_graph_at(rows, Utc::now())
}

/// [`build_graph`] with next executions computed relative to `now`.
pub(crate) fn build_graph_at(rows: &[ImportRow], now: DateTime<Utc>) -> (RawGraph, ImportSummary) {
    let mut summary = ImportSummary::default();
    let mut nodes: Vec<Node> = Vec::new();
    let mut slots: HashMap<NodeId, usize> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut seen: HashSet<EdgeId> = HashSet::new();

    for row in rows {
        if row.object.trim().is_empty() {
            summary.skipped_rows += 1;
            continue;
        }

        let node = row.to_node(now);
        let id = node.id.clone();
        match slots.get(&id) {
            Some(&slot) => {
                summary.replaced_rows += 1;
                nodes[slot] = node;
            }
            None => {
                slots.insert(id.clone(), nodes.len());
                nodes.push(node);
            }
        }

        for dependency in row.depends_on.ids() {
            let edge = Edge::new(dependency, id.clone());
            if seen.insert(edge.id()) {
                edges.push(edge);
            } else {
                summary.duplicate_edges += 1;
            }
        }
    }

    summary.nodes = nodes.len();
    summary.edges = edges.len();
    (RawGraph { nodes, edges }, summary)
}
