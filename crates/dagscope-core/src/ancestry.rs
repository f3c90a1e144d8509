//! Upstream traversal over a loaded graph.
//!
//! Both queries walk edges backwards (target -> source) from a start node
//! with an iterative worklist. A visited set guarantees termination on cyclic
//! graphs and self-loops: a node, once visited, is never expanded again. The
//! start node is marked visited before the walk begins, so it is never
//! reported as its own ancestor even when a cycle leads back to it.
//!
//! Unknown start nodes yield empty results.

use crate::domain::{EdgeId, NodeId};
use crate::model::GraphModel;
use std::collections::{HashSet, VecDeque};

/// Ancestor nodes of a start node plus every edge traversed to reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamClosure {
    /// Every ancestor of the start node (start node excluded)
    pub nodes: HashSet<NodeId>,
    /// Every incoming edge of the start node and of each ancestor
    pub edges: HashSet<EdgeId>,
}

impl UpstreamClosure {
    /// Whether the closure contains nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Merge another closure into this one
    pub fn extend(&mut self, other: UpstreamClosure) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }
}

/// Every node reachable from `id` by following edges backwards, excluding
/// `id` itself.
#[must_use]
pub fn all_ancestors(model: &GraphModel, id: &NodeId) -> HashSet<NodeId> {
    walk_upstream(model, id, |_| {})
}

/// Ancestors of `id` together with every edge traversed to reach them.
///
/// Traversed edges are the incoming edges of every expanded node, i.e. of
/// `id` and each of its ancestors. A self-loop on `id` is therefore part of
/// the edge set.
#[must_use]
pub fn upstream_closure(model: &GraphModel, id: &NodeId) -> UpstreamClosure {
    let mut edges = HashSet::new();
    let nodes = walk_upstream(model, id, |edge| {
        edges.insert(edge);
    });
    UpstreamClosure { nodes, edges }
}

/// BFS over incoming edges. `on_edge` sees every traversed edge exactly once.
fn walk_upstream(
    model: &GraphModel,
    start: &NodeId,
    mut on_edge: impl FnMut(EdgeId),
) -> HashSet<NodeId> {
    let mut ancestors = HashSet::new();
    if !model.contains(start) {
        return ancestors;
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    visited.insert(start.clone());
    let mut queue: VecDeque<NodeId> = VecDeque::from([start.clone()]);

    while let Some(current) = queue.pop_front() {
        for edge in model.incoming(&current) {
            on_edge(edge.id());
            if visited.insert(edge.source.clone()) {
                ancestors.insert(edge.source.clone());
                queue.push_back(edge.source.clone());
            }
        }
    }

    tracing::trace!(node = %start, ancestors = ancestors.len(), "Walked upstream");
    ancestors
}
