//! Selection state and the highlighted ancestry chain derived from it.

use crate::ancestry::all_ancestors;
use crate::domain::{EdgeId, NodeId};
use crate::model::GraphModel;
use std::collections::HashSet;

/// Selected node plus the derived highlighted sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<NodeId>,
    highlighted_nodes: HashSet<NodeId>,
    highlighted_edges: HashSet<EdgeId>,
}

impl SelectionState {
    /// State with nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` and return the next state.
    ///
    /// Selecting the already-selected node clears the selection. Otherwise
    /// the node and all of its ancestors are highlighted, along with every
    /// edge that ends at an ancestor or runs from an ancestor into `id`.
    /// Ids that are not part of `model` leave the state unchanged.
    #[must_use]
    pub fn select(&self, model: &GraphModel, id: &NodeId) -> Self {
        if !model.contains(id) {
            tracing::debug!(node = %id, "Ignoring selection of unknown node");
            return self.clone();
        }

        if self.selected.as_ref() == Some(id) {
            tracing::debug!(node = %id, "Deselected node");
            return Self::clear();
        }

        let parents = all_ancestors(model, id);
        let highlighted_edges = model
            .edges()
            .iter()
            .filter(|edge| {
                (parents.contains(&edge.source) && edge.target == *id)
                    || parents.contains(&edge.target)
            })
            .map(|edge| edge.id())
            .collect::<HashSet<_>>();

        let mut highlighted_nodes = parents;
        highlighted_nodes.insert(id.clone());

        tracing::debug!(
            node = %id,
            nodes = highlighted_nodes.len(),
            edges = highlighted_edges.len(),
            "Selected node"
        );

        Self {
            selected: Some(id.clone()),
            highlighted_nodes,
            highlighted_edges,
        }
    }

    /// Empty selection, regardless of any prior state
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    /// Currently selected node
    #[must_use]
    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// Whether the node is part of the highlighted chain
    #[must_use]
    pub fn is_node_highlighted(&self, id: &NodeId) -> bool {
        self.highlighted_nodes.contains(id)
    }

    /// Whether the edge is part of the highlighted chain
    #[must_use]
    pub fn is_edge_highlighted(&self, id: &EdgeId) -> bool {
        self.highlighted_edges.contains(id)
    }

    /// Highlighted nodes
    #[must_use]
    pub fn highlighted_nodes(&self) -> &HashSet<NodeId> {
        &self.highlighted_nodes
    }

    /// Highlighted edges
    #[must_use]
    pub fn highlighted_edges(&self) -> &HashSet<EdgeId> {
        &self.highlighted_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Node};

    fn graph(ids: &[&str], edges: &[(&str, &str)]) -> GraphModel {
        let nodes = ids.iter().map(|id| Node::new(*id)).collect();
        let edges = edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect();
        GraphModel::load(nodes, edges).0
    }

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn select_highlights_ancestor_subgraph() {
        let model = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("a", "d")]);
        let state = SelectionState::new().select(&model, &id("c"));

        assert_eq!(state.selected(), Some(&id("c")));
        assert_eq!(
            state.highlighted_nodes(),
            &[id("a"), id("b"), id("c")].into_iter().collect()
        );
        assert_eq!(
            state.highlighted_edges(),
            &[EdgeId::new("a", "b"), EdgeId::new("b", "c")]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn reselect_clears() {
        let model = graph(&["a", "b"], &[("a", "b")]);
        let state = SelectionState::new()
            .select(&model, &id("b"))
            .select(&model, &id("b"));
        assert_eq!(state, SelectionState::clear());
    }

    #[test]
    fn selecting_another_node_replaces_highlight() {
        let model = graph(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y")]);
        let state = SelectionState::new()
            .select(&model, &id("b"))
            .select(&model, &id("y"));

        assert!(state.is_node_highlighted(&id("x")));
        assert!(!state.is_node_highlighted(&id("a")));
        assert!(!state.is_edge_highlighted(&EdgeId::new("a", "b")));
    }

    #[test]
    fn self_loop_on_selected_node_is_not_highlighted() {
        let model = graph(&["a", "b"], &[("a", "a"), ("b", "a")]);
        let state = SelectionState::new().select(&model, &id("a"));

        assert!(state.is_edge_highlighted(&EdgeId::new("b", "a")));
        assert!(!state.is_edge_highlighted(&EdgeId::new("a", "a")));
    }

    #[test]
    fn unknown_node_keeps_selection() {
        let model = graph(&["a", "b"], &[("a", "b")]);
        let state = SelectionState::new().select(&model, &id("b"));
        assert_eq!(state.select(&model, &id("ghost")), state);
    }
}
