//! Domain types for dependency graphs.
//!
//! Nodes are units of work (tables, jobs, reports) carrying ownership and
//! schedule metadata as opaque display strings. Edges point downstream: an
//! edge `source -> target` means the target depends on the source.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Unique, stable identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity of an edge: the ordered `(source, target)` pair.
///
/// Two edges between the same ordered pair are the same edge. Displayed and
/// serialized as `source|target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    /// Upstream endpoint
    pub source: NodeId,
    /// Downstream endpoint
    pub target: NodeId,
}

impl EdgeId {
    /// Create an edge ID from its endpoints
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Canvas coordinates of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A unit of work in the dependency graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Display label (falls back to the id when empty)
    #[serde(default)]
    pub label: String,

    /// Owning team or person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Database schema the object lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Server hosting the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    /// Last successful update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    /// Schedule expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,

    /// Next scheduled execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<String>,

    /// Business calendar the schedule follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,

    /// Stored canvas position, if one was ever saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// Create a node with no metadata, labelled with its id
    pub fn new(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        Self {
            label: id.0.clone(),
            id,
            owner: None,
            schema: None,
            server: None,
            creation_date: None,
            last_update: None,
            cron_expression: None,
            next_execution: None,
            calendar: None,
            position: None,
        }
    }

    /// Set the owner
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the stored position
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Label to show for this node
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}

/// A dependency relation: `target` depends on `source`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Upstream node (the dependency)
    pub source: NodeId,
    /// Downstream node (the dependent)
    pub target: NodeId,
}

impl Edge {
    /// Create an edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Identity of this edge
    #[must_use]
    pub fn id(&self) -> EdgeId {
        EdgeId::new(self.source.clone(), self.target.clone())
    }
}

/// Raw graph as delivered by a graph source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraph {
    /// All nodes
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// All edges
    #[serde(default)]
    pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_id_displays_with_pipe() {
        let edge = Edge::new("orders", "daily_sales");
        assert_eq!(edge.id().to_string(), "orders|daily_sales");
    }

    #[test]
    fn edge_id_serializes_as_string() {
        let json = serde_json::to_string(&EdgeId::new("a", "b")).unwrap();
        assert_eq!(json, "\"a|b\"");
    }

    #[test]
    fn display_label_falls_back_to_id() {
        let mut node = Node::new("stg_customers");
        node.label.clear();
        assert_eq!(node.display_label(), "stg_customers");

        node.label = "Customers (staging)".to_string();
        assert_eq!(node.display_label(), "Customers (staging)");
    }

    #[test]
    fn node_deserializes_with_missing_metadata() {
        let node: Node = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert_eq!(node.id, NodeId::from("a"));
        assert!(node.label.is_empty());
        assert!(node.owner.is_none());
        assert!(node.position.is_none());
    }
}
