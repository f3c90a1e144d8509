//! The view state machine consumed by the presentation layer.
//!
//! A [`ViewSession`] is an immutable snapshot: a loaded graph plus collapse
//! and selection state. Every operation takes the current snapshot and
//! returns the next one, so event handlers never act on stale collections.
//! The graph itself is shared behind an `Arc`, making snapshots cheap to
//! keep around (e.g. to roll back after a failed reload).

use crate::domain::{Edge, Node, NodeId, RawGraph};
use crate::model::{GraphModel, LoadWarning};
use crate::projector::{project, PositionLookup, View};
use crate::selection::SelectionState;
use crate::visibility::VisibilityState;
use std::sync::Arc;

/// A user interaction that changes view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Expand/collapse the upstream of a node
    ToggleCollapse(NodeId),
    /// Highlight (or un-highlight) the ancestry of a node
    Select(NodeId),
    /// Click on empty canvas: drop any highlight
    ClearSelection,
}

/// Graph plus the collapse and selection state applied to it.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    model: Arc<GraphModel>,
    visibility: VisibilityState,
    selection: SelectionState,
}

impl ViewSession {
    /// Session over an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the graph, resetting collapse and selection state.
    #[must_use]
    pub fn load_graph(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> (Self, Vec<LoadWarning>) {
        Self::fresh(GraphModel::load(nodes, edges))
    }

    /// Replace the graph from a [`RawGraph`]
    #[must_use]
    pub fn load_raw(&self, raw: RawGraph) -> (Self, Vec<LoadWarning>) {
        Self::fresh(GraphModel::from_raw(raw))
    }

    fn fresh((model, warnings): (GraphModel, Vec<LoadWarning>)) -> (Self, Vec<LoadWarning>) {
        let session = Self {
            model: Arc::new(model),
            visibility: VisibilityState::new(),
            selection: SelectionState::new(),
        };
        (session, warnings)
    }

    /// Toggle collapse of `id`
    #[must_use]
    pub fn toggle_collapse(&self, id: &NodeId) -> Self {
        Self {
            model: Arc::clone(&self.model),
            visibility: self.visibility.toggle_collapse(&self.model, id),
            selection: self.selection.clone(),
        }
    }

    /// Select (or deselect) `id`
    #[must_use]
    pub fn select(&self, id: &NodeId) -> Self {
        Self {
            model: Arc::clone(&self.model),
            visibility: self.visibility.clone(),
            selection: self.selection.select(&self.model, id),
        }
    }

    /// Drop any selection
    #[must_use]
    pub fn clear_selection(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            visibility: self.visibility.clone(),
            selection: SelectionState::clear(),
        }
    }

    /// Apply a single event
    #[must_use]
    pub fn apply(&self, event: &ViewEvent) -> Self {
        match event {
            ViewEvent::ToggleCollapse(id) => self.toggle_collapse(id),
            ViewEvent::Select(id) => self.select(id),
            ViewEvent::ClearSelection => self.clear_selection(),
        }
    }

    /// Apply events in order
    #[must_use]
    pub fn apply_all<'a>(&self, events: impl IntoIterator<Item = &'a ViewEvent>) -> Self {
        events
            .into_iter()
            .fold(self.clone(), |session, event| session.apply(event))
    }

    /// Renderable projection of the current state
    #[must_use]
    pub fn project(&self, positions: Option<&dyn PositionLookup>) -> View {
        project(&self.model, &self.visibility, &self.selection, positions)
    }

    /// The loaded graph
    #[must_use]
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// Collapse state
    #[must_use]
    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    /// Selection state
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}
