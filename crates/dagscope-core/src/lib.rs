//! Dagscope core - graph visibility and ancestry-highlighting engine.
//!
//! This crate holds the pure, synchronous state machine behind a dependency
//! graph view. Given raw nodes and edges it can:
//!
//! - compute every ancestor of a node ([`ancestry::all_ancestors`])
//! - hide the upstream closure of collapsed nodes ([`visibility`])
//! - highlight the ancestor chain of a selected node ([`selection`])
//! - project the result into a flag-annotated, renderable view ([`projector`])
//!
//! [`session::ViewSession`] ties these together and is the only type a
//! presentation layer needs to hold.
//!
//! # Edge Direction
//!
//! An edge `source -> target` means "source is a dependency of target": edges
//! point downstream. Ancestors are found by walking edges backwards.
//!
//! # Example
//!
//! ```
//! use dagscope_core::domain::{Edge, Node, NodeId};
//! use dagscope_core::session::ViewSession;
//!
//! let nodes = vec![Node::new("extract"), Node::new("load"), Node::new("report")];
//! let edges = vec![Edge::new("extract", "load"), Edge::new("load", "report")];
//!
//! let (session, warnings) = ViewSession::new().load_graph(nodes, edges);
//! assert!(warnings.is_empty());
//!
//! let session = session.toggle_collapse(&NodeId::from("report"));
//! let view = session.project(None);
//! assert_eq!(view.nodes.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod ancestry;
pub mod domain;
pub mod error;
pub mod model;
pub mod projector;
pub mod selection;
pub mod session;
pub mod visibility;

pub use error::{Error, Result};
