//! The loaded graph: immutable source of truth for one data load.
//!
//! [`GraphModel::load`] turns raw node/edge lists into a validated graph.
//! Loading never fails; data problems are dropped and reported back as
//! [`LoadWarning`] values.
//!
//! # Graph Representation
//!
//! Nodes and edges are kept in load order (for deterministic projection)
//! alongside a petgraph `DiGraph` that serves as the incoming-edge index used
//! by ancestry queries. Node weights are `NodeId`s; edge weights are unit.
//!
//! Invariants maintained by `load`:
//! - `graph` node index `i` corresponds to `nodes[i]`
//! - `graph` edge index `i` corresponds to `edges[i]`
//! - every edge endpoint exists in `node_map`
//! - at most one edge per ordered `(source, target)` pair

use crate::domain::{Edge, EdgeId, Node, NodeId, RawGraph};
use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Non-fatal data problems found while loading a graph.
///
/// The offending record is skipped (or merged) and loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The same node id appeared more than once.
    ///
    /// **Effect**: the later record replaces the earlier one, keeping the
    /// earlier record's position in load order.
    DuplicateNode {
        /// Repeated node id
        id: NodeId,
    },

    /// An edge references a node that is not in the graph.
    ///
    /// **Effect**: the edge is dropped.
    MalformedEdge {
        /// Edge source as given
        source: NodeId,
        /// Edge target as given
        target: NodeId,
        /// The endpoint that does not exist
        missing: NodeId,
    },

    /// The same `(source, target)` pair appeared more than once.
    ///
    /// **Effect**: the repeat is dropped; one edge remains.
    DuplicateEdge {
        /// Edge source
        source: NodeId,
        /// Edge target
        target: NodeId,
    },
}

impl LoadWarning {
    /// Human-readable description of the warning
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::DuplicateNode { id } => format!("duplicate node '{id}': later record kept"),
            Self::MalformedEdge {
                source,
                target,
                missing,
            } => format!("edge {source} -> {target} dropped: unknown node '{missing}'"),
            Self::DuplicateEdge { source, target } => {
                format!("duplicate edge {source} -> {target} merged")
            }
        }
    }

    /// Short identifier for the warning kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateNode { .. } => "duplicate_node",
            Self::MalformedEdge { .. } => "malformed_edge",
            Self::DuplicateEdge { .. } => "duplicate_edge",
        }
    }
}

/// A validated, immutable dependency graph.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Nodes in load order
    nodes: Vec<Node>,

    /// Edges in load order, deduplicated by identity
    edges: Vec<Edge>,

    /// Incoming-edge index. Edge direction: source (dependency) -> target.
    graph: DiGraph<NodeId, ()>,

    /// Mapping from NodeId to graph NodeIndex
    node_map: HashMap<NodeId, NodeIndex>,
}

impl GraphModel {
    /// Create an empty graph
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a graph from raw node and edge lists.
    ///
    /// Duplicate nodes are merged, edges with unknown endpoints are dropped
    /// and duplicate edges collapse to one. Each of these is reported in the
    /// returned warnings.
    #[must_use]
    pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> (Self, Vec<LoadWarning>) {
        let mut model = Self::default();
        let mut warnings = Vec::new();

        for node in nodes {
            if let Some(&index) = model.node_map.get(&node.id) {
                warnings.push(LoadWarning::DuplicateNode {
                    id: node.id.clone(),
                });
                model.nodes[index.index()] = node;
                continue;
            }

            let index = model.graph.add_node(node.id.clone());
            model.node_map.insert(node.id.clone(), index);
            model.nodes.push(node);
        }

        let mut seen: HashSet<EdgeId> = HashSet::with_capacity(edges.len());
        for edge in edges {
            let source = model.node_map.get(&edge.source).copied();
            let target = model.node_map.get(&edge.target).copied();
            let (Some(source), Some(target)) = (source, target) else {
                let missing = if source.is_none() {
                    edge.source.clone()
                } else {
                    edge.target.clone()
                };
                warnings.push(LoadWarning::MalformedEdge {
                    source: edge.source,
                    target: edge.target,
                    missing,
                });
                continue;
            };

            if !seen.insert(edge.id()) {
                warnings.push(LoadWarning::DuplicateEdge {
                    source: edge.source,
                    target: edge.target,
                });
                continue;
            }

            model.graph.add_edge(source, target, ());
            model.edges.push(edge);
        }

        tracing::debug!(
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            warnings = warnings.len(),
            "Loaded graph model"
        );

        (model, warnings)
    }

    /// Build a graph from a [`RawGraph`]
    #[must_use]
    pub fn from_raw(raw: RawGraph) -> (Self, Vec<LoadWarning>) {
        Self::load(raw.nodes, raw.edges)
    }

    /// All nodes in load order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in load order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this id is loaded
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up a node
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.node_map.get(id).map(|index| &self.nodes[index.index()])
    }

    /// Look up a node, failing if it is not loaded
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` if the id is not part of the graph.
    pub fn require(&self, id: &NodeId) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::UnknownNode(id.clone()))
    }

    /// Edges terminating at `id` (the edges from its direct dependencies).
    ///
    /// Empty for unknown ids.
    pub fn incoming(&self, id: &NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.node_map
            .get(id)
            .into_iter()
            .flat_map(move |&index| self.graph.edges_directed(index, Direction::Incoming))
            .map(move |edge| &self.edges[edge.id().index()])
    }
}
