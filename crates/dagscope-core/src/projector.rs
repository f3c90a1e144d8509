//! Projection of graph + visibility + selection into a renderable view.
//!
//! [`project`] is a pure function: identical inputs always yield identical
//! output, in load order of the underlying [`GraphModel`].

use crate::domain::{EdgeId, Node, NodeId, Position};
use crate::model::GraphModel;
use crate::selection::SelectionState;
use crate::visibility::VisibilityState;
use serde::Serialize;
use std::collections::HashMap;

/// Source of node positions owned by the presentation layer.
///
/// Positions found here take precedence over positions stored on nodes.
pub trait PositionLookup {
    /// Position for `id`, if known
    fn position(&self, id: &NodeId) -> Option<Position>;
}

impl PositionLookup for HashMap<NodeId, Position> {
    fn position(&self, id: &NodeId) -> Option<Position> {
        self.get(id).copied()
    }
}

/// A visible node with its display flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    /// The node itself
    pub node: Node,
    /// Resolved canvas position
    pub position: Position,
    /// Part of the selected ancestry chain
    pub is_highlighted: bool,
    /// Collapsed (upstream hidden); drives the expand/collapse icon
    pub is_collapsed: bool,
}

/// A visible edge with its display flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    /// Edge identity (`source|target`)
    pub id: EdgeId,
    /// Upstream node
    pub source: NodeId,
    /// Downstream node
    pub target: NodeId,
    /// Part of the selected ancestry chain
    pub is_highlighted: bool,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    /// Visible nodes in load order
    pub nodes: Vec<ViewNode>,
    /// Visible edges in load order
    pub edges: Vec<ViewEdge>,
}

impl View {
    /// Visible node by id
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.node.id == *id)
    }

    /// Visible edge by id
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&ViewEdge> {
        self.edges.iter().find(|e| e.id == *id)
    }
}

/// Combine the graph with collapse and selection state.
///
/// Nodes in the hidden set and edges in the hidden edge set are left out;
/// everything else is annotated with its highlight and collapse flags.
/// Position resolution: `positions` lookup, then the node's stored position,
/// then the origin.
#[must_use]
pub fn project(
    model: &GraphModel,
    visibility: &VisibilityState,
    selection: &SelectionState,
    positions: Option<&dyn PositionLookup>,
) -> View {
    let nodes = model
        .nodes()
        .iter()
        .filter(|node| !visibility.is_node_hidden(&node.id))
        .map(|node| ViewNode {
            position: positions
                .and_then(|lookup| lookup.position(&node.id))
                .or(node.position)
                .unwrap_or_default(),
            is_highlighted: selection.is_node_highlighted(&node.id),
            is_collapsed: visibility.is_collapsed(&node.id),
            node: node.clone(),
        })
        .collect();

    let edges = model
        .edges()
        .iter()
        .map(|edge| (edge, edge.id()))
        .filter(|(_, id)| !visibility.is_edge_hidden(id))
        .map(|(edge, id)| ViewEdge {
            is_highlighted: selection.is_edge_highlighted(&id),
            id,
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();

    View { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Edge;

    fn model() -> GraphModel {
        GraphModel::load(
            vec![
                Node::new("a").with_position(Position::new(1.0, 2.0)),
                Node::new("b"),
                Node::new("c"),
                Node::new("d"),
            ],
            vec![
                Edge::new("a", "b"),
                Edge::new("b", "c"),
                Edge::new("a", "d"),
            ],
        )
        .0
    }

    #[test]
    fn untouched_state_shows_everything() {
        let model = model();
        let view = project(
            &model,
            &VisibilityState::new(),
            &SelectionState::new(),
            None,
        );

        assert_eq!(view.nodes.len(), 4);
        assert_eq!(view.edges.len(), 3);
        assert!(view.nodes.iter().all(|n| !n.is_highlighted && !n.is_collapsed));
    }

    #[test]
    fn collapsed_and_highlighted_flags() {
        let model = model();
        let c = NodeId::from("c");
        let d = NodeId::from("d");
        let visibility = VisibilityState::new().toggle_collapse(&model, &c);
        let selection = SelectionState::new().select(&model, &d);

        let view = project(&model, &visibility, &selection, None);

        let ids: Vec<_> = view.nodes.iter().map(|n| n.node.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
        assert!(view.node(&c).unwrap().is_collapsed);
        assert!(view.node(&d).unwrap().is_highlighted);

        let edge_ids: Vec<_> = view.edges.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(edge_ids, vec!["a|d"]);
        assert!(view.edges[0].is_highlighted);
    }

    #[test]
    fn position_lookup_overrides_stored_position() {
        let model = model();
        let mut positions = HashMap::new();
        positions.insert(NodeId::from("b"), Position::new(10.0, 20.0));

        let view = project(
            &model,
            &VisibilityState::new(),
            &SelectionState::new(),
            Some(&positions),
        );

        assert_eq!(view.nodes[0].position, Position::new(1.0, 2.0));
        assert_eq!(view.nodes[1].position, Position::new(10.0, 20.0));
        assert_eq!(view.nodes[2].position, Position::default());
    }
}
