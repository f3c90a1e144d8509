//! Output formatting for CLI commands.
//!
//! Every printer comes in two flavors: human-readable text (colored through
//! [`color`]) and pretty JSON for programmatic use. Text printers write to a
//! generic [`Write`] so they can be exercised against a buffer.

pub mod color;

use crate::store::StoreWarning;
use dagscope_core::ancestry::UpstreamClosure;
use dagscope_core::domain::{EdgeId, NodeId};
use dagscope_core::model::LoadWarning;
use dagscope_core::projector::View;
use dagscope_core::session::ViewSession;
use serde::Serialize;
use std::collections::HashSet;
use std::env;
use std::io::{self, Write};

pub use color::{info, success, warning};

use color::{bold, colorize_node, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `DAGSCOPE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("DAGSCOPE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

// ============================================================================
// JSON Shapes
// ============================================================================

/// JSON shape of a projected view plus the state that produced it
#[derive(Debug, Serialize)]
struct ViewJson<'a> {
    selected: Option<&'a NodeId>,
    collapsed: Vec<&'a NodeId>,
    warnings: Vec<WarningJson>,
    #[serde(flatten)]
    view: &'a View,
}

/// JSON shape of an upstream closure
#[derive(Debug, Serialize)]
struct ClosureJson<'a> {
    node: &'a NodeId,
    nodes: Vec<&'a NodeId>,
    edges: Vec<&'a EdgeId>,
}

/// JSON shape of a load warning
#[derive(Debug, Serialize)]
pub struct WarningJson {
    /// Machine-readable warning kind
    pub kind: &'static str,
    /// Human-readable description
    pub message: String,
}

impl From<&LoadWarning> for WarningJson {
    fn from(warning: &LoadWarning) -> Self {
        Self {
            kind: warning.kind(),
            message: warning.description(),
        }
    }
}

impl From<&StoreWarning> for WarningJson {
    fn from(warning: &StoreWarning) -> Self {
        Self {
            kind: "malformed_record",
            message: warning.description(),
        }
    }
}

/// Store warnings followed by load warnings, in their JSON shape
pub fn warnings_json(load: &[LoadWarning], store: &[StoreWarning]) -> Vec<WarningJson> {
    store
        .iter()
        .map(WarningJson::from)
        .chain(load.iter().map(WarningJson::from))
        .collect()
}

fn view_json<'a>(
    session: &'a ViewSession,
    view: &'a View,
    warnings: Vec<WarningJson>,
) -> ViewJson<'a> {
    ViewJson {
        selected: session.selection().selected(),
        collapsed: sorted(session.visibility().collapsed()),
        warnings,
        view,
    }
}

fn sorted<T: Ord>(set: &HashSet<T>) -> Vec<&T> {
    let mut items: Vec<&T> = set.iter().collect();
    items.sort();
    items
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print the projected view of a session.
///
/// JSON output embeds `warnings`; text output leaves them to
/// [`print_warnings`].
pub fn print_view(
    session: &ViewSession,
    view: &View,
    warnings: Vec<WarningJson>,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&view_json(session, view, warnings)),
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_view_text(&mut handle, session, view, &OutputConfig::from_env())
        }
    }
}

/// Print the ancestor set of a node
pub fn print_ancestors(id: &NodeId, ancestors: &HashSet<NodeId>, mode: OutputMode) -> io::Result<()> {
    let ids = sorted(ancestors);
    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "node": id,
            "ancestors": ids,
        })),
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_ancestors_text(&mut handle, id, &ids, &OutputConfig::from_env())
        }
    }
}

/// Print the upstream closure of a node
pub fn print_closure(id: &NodeId, closure: &UpstreamClosure, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&ClosureJson {
            node: id,
            nodes: sorted(&closure.nodes),
            edges: sorted(&closure.edges),
        }),
        OutputMode::Text => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_closure_text(&mut handle, id, closure, &OutputConfig::from_env())
        }
    }
}

/// Print warnings to stderr (text mode only; JSON output embeds them).
pub fn print_warnings(load: &[LoadWarning], store: &[StoreWarning]) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_warnings_text(&mut handle, load, store, &OutputConfig::from_env())
}

// ============================================================================
// Text Formatting
// ============================================================================

fn write_view_text<W: Write>(
    w: &mut W,
    session: &ViewSession,
    view: &View,
    config: &OutputConfig,
) -> io::Result<()> {
    let total_nodes = session.model().node_count();
    writeln!(
        w,
        "{} ({} of {} nodes, {} edges)",
        bold("View", config),
        view.nodes.len(),
        total_nodes,
        view.edges.len()
    )?;

    if let Some(selected) = session.selection().selected() {
        writeln!(
            w,
            "{} {}",
            dimmed("Selected:", config),
            colorize_node(selected.as_str(), true, config)
        )?;
    }

    if view.nodes.is_empty() {
        writeln!(w, "{}", dimmed("(no visible nodes)", config))?;
        return Ok(());
    }

    writeln!(w)?;
    for view_node in &view.nodes {
        let marker = if view_node.is_collapsed { "[+]" } else { "[-]" };
        write!(
            w,
            "  {} {}",
            dimmed(marker, config),
            colorize_node(view_node.node.id.as_str(), view_node.is_highlighted, config)
        )?;
        let label = view_node.node.display_label();
        if label != view_node.node.id.as_str() {
            write!(w, " {}", dimmed(&format!("\"{label}\""), config))?;
        }
        let node = &view_node.node;
        let details = [
            ("owner", &node.owner),
            ("last_update", &node.last_update),
            ("next", &node.next_execution),
        ];
        for (key, value) in details {
            if let Some(value) = value {
                write!(w, " {}", dimmed(&format!("{key}={value}"), config))?;
            }
        }
        writeln!(
            w,
            " {}",
            dimmed(
                &format!("@ ({}, {})", view_node.position.x, view_node.position.y),
                config
            )
        )?;
    }

    if !view.edges.is_empty() {
        writeln!(w)?;
        for edge in &view.edges {
            writeln!(
                w,
                "  {} {} {}",
                colorize_node(edge.source.as_str(), edge.is_highlighted, config),
                dimmed("->", config),
                colorize_node(edge.target.as_str(), edge.is_highlighted, config)
            )?;
        }
    }

    Ok(())
}

fn write_ancestors_text<W: Write>(
    w: &mut W,
    id: &NodeId,
    ancestors: &[&NodeId],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} ({})",
        bold("Ancestors of", config),
        colorize_node(id.as_str(), false, config),
        ancestors.len()
    )?;
    if ancestors.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
    }
    for ancestor in ancestors {
        writeln!(w, "  {}", colorize_node(ancestor.as_str(), false, config))?;
    }
    Ok(())
}

fn write_closure_text<W: Write>(
    w: &mut W,
    id: &NodeId,
    closure: &UpstreamClosure,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} ({} nodes, {} edges)",
        bold("Upstream of", config),
        colorize_node(id.as_str(), false, config),
        closure.nodes.len(),
        closure.edges.len()
    )?;
    if closure.is_empty() {
        writeln!(w, "  {}", dimmed("(nothing upstream)", config))?;
        return Ok(());
    }
    for node in sorted(&closure.nodes) {
        writeln!(w, "  {}", colorize_node(node.as_str(), false, config))?;
    }
    for edge in sorted(&closure.edges) {
        writeln!(
            w,
            "  {} {} {}",
            colorize_node(edge.source.as_str(), false, config),
            dimmed("->", config),
            colorize_node(edge.target.as_str(), false, config)
        )?;
    }
    Ok(())
}

fn write_warnings_text<W: Write>(
    w: &mut W,
    load: &[LoadWarning],
    store: &[StoreWarning],
    config: &OutputConfig,
) -> io::Result<()> {
    let messages = store
        .iter()
        .map(StoreWarning::description)
        .chain(load.iter().map(LoadWarning::description));
    for message in messages {
        writeln!(w, "{} {message}", warning("warning:", config))?;
    }
    Ok(())
}
