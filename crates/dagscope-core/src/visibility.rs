//! Collapse state and the hidden node/edge sets derived from it.
//!
//! The collapsed set is the only authoritative state. Hidden sets are always
//! recomputed from scratch as the union of the upstream closures of every
//! collapsed node, so a node shared by two collapsed branches stays hidden
//! until both collapses are undone.

use crate::ancestry::{upstream_closure, UpstreamClosure};
use crate::domain::{EdgeId, NodeId};
use crate::model::GraphModel;
use std::collections::HashSet;

/// Collapsed nodes plus the derived hidden sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    collapsed: HashSet<NodeId>,
    hidden: UpstreamClosure,
}

impl VisibilityState {
    /// State with nothing collapsed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id` in or out of the collapsed set and return the next state.
    ///
    /// Collapsing a node with no upstream still marks it collapsed. Ids that
    /// are not part of `model` leave the state unchanged.
    #[must_use]
    pub fn toggle_collapse(&self, model: &GraphModel, id: &NodeId) -> Self {
        if !model.contains(id) {
            tracing::debug!(node = %id, "Ignoring collapse toggle for unknown node");
            return self.clone();
        }

        let mut collapsed = self.collapsed.clone();
        if !collapsed.remove(id) {
            collapsed.insert(id.clone());
        }

        let next = Self::recompute(model, collapsed);
        tracing::debug!(
            node = %id,
            collapsed = next.collapsed.len(),
            hidden_nodes = next.hidden.nodes.len(),
            hidden_edges = next.hidden.edges.len(),
            "Toggled collapse"
        );
        next
    }

    /// Rebuild hidden sets for a collapsed set
    fn recompute(model: &GraphModel, collapsed: HashSet<NodeId>) -> Self {
        let mut hidden = UpstreamClosure::default();
        for id in &collapsed {
            hidden.extend(upstream_closure(model, id));
        }
        Self { collapsed, hidden }
    }

    /// Whether `id` is collapsed
    #[must_use]
    pub fn is_collapsed(&self, id: &NodeId) -> bool {
        self.collapsed.contains(id)
    }

    /// Whether `id` is hidden by some collapsed descendant
    #[must_use]
    pub fn is_node_hidden(&self, id: &NodeId) -> bool {
        self.hidden.nodes.contains(id)
    }

    /// Whether the edge is hidden by some collapsed descendant
    #[must_use]
    pub fn is_edge_hidden(&self, id: &EdgeId) -> bool {
        self.hidden.edges.contains(id)
    }

    /// Collapsed nodes
    #[must_use]
    pub fn collapsed(&self) -> &HashSet<NodeId> {
        &self.collapsed
    }

    /// Hidden nodes
    #[must_use]
    pub fn hidden_nodes(&self) -> &HashSet<NodeId> {
        &self.hidden.nodes
    }

    /// Hidden edges
    #[must_use]
    pub fn hidden_edges(&self) -> &HashSet<EdgeId> {
        &self.hidden.edges
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
    fn collapse_hides_upstream_only() {
        let model = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("a", "d")]);
        let state = VisibilityState::new().toggle_collapse(&model, &id("c"));

        assert!(state.is_collapsed(&id("c")));
        assert!(state.is_node_hidden(&id("a")));
        assert!(state.is_node_hidden(&id("b")));
        assert!(!state.is_node_hidden(&id("c")));
        assert!(!state.is_node_hidden(&id("d")));
        assert!(state.is_edge_hidden(&EdgeId::new("a", "b")));
        assert!(state.is_edge_hidden(&EdgeId::new("b", "c")));
        assert!(!state.is_edge_hidden(&EdgeId::new("a", "d")));
    }

    #[test]
    fn toggle_twice_restores_state() {
        let model = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let start = VisibilityState::new();
        let state = start.toggle_collapse(&model, &id("c")).toggle_collapse(&model, &id("c"));
        assert_eq!(state, start);
    }

    #[test]
    fn shared_ancestor_stays_hidden_until_both_expanded() {
        let model = graph(&["c", "a", "b"], &[("c", "a"), ("c", "b")]);
        let both = VisibilityState::new()
            .toggle_collapse(&model, &id("a"))
            .toggle_collapse(&model, &id("b"));
        assert!(both.is_node_hidden(&id("c")));

        let only_b = both.toggle_collapse(&model, &id("a"));
        assert!(only_b.is_node_hidden(&id("c")));
        assert!(!only_b.is_edge_hidden(&EdgeId::new("c", "a")));
        assert!(only_b.is_edge_hidden(&EdgeId::new("c", "b")));

        let none = only_b.toggle_collapse(&model, &id("b"));
        assert!(none.hidden_nodes().is_empty());
        assert!(none.hidden_edges().is_empty());
    }

    #[test]
    fn collapsing_a_root_only_marks_it() {
        let model = graph(&["a", "b"], &[("a", "b")]);
        let state = VisibilityState::new().toggle_collapse(&model, &id("a"));

        assert!(state.is_collapsed(&id("a")));
        assert!(state.hidden_nodes().is_empty());
        assert!(state.hidden_edges().is_empty());
    }

    #[test]
    fn unknown_node_is_a_no_op() {
        let model = graph(&["a", "b"], &[("a", "b")]);
        let state = VisibilityState::new().toggle_collapse(&model, &id("b"));
        let next = state.toggle_collapse(&model, &id("missing"));
        assert_eq!(next, state);
    }
}
