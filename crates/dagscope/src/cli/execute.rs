//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{ImportArgs, InfoArgs, InitArgs, MoveArgs, NodeArgs, ResetArgs, ViewArgs};
use crate::app::App;
use crate::output::{self, OutputMode};
use crate::store::StoreBackend;
use dagscope_core::ancestry::{all_ancestors, upstream_closure};
use dagscope_core::domain::{NodeId, Position};
use dagscope_core::session::ViewEvent;

/// Print load and store warnings to stderr in text mode.
///
/// JSON-mode commands embed the same warnings through [`output::warnings_json`].
fn report_warnings(app: &App, output_mode: OutputMode) -> Result<()> {
    if output_mode == OutputMode::Text {
        output::print_warnings(app.load_warnings(), app.store_warnings())?;
    }
    Ok(())
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing dagscope repository...");
    }

    let result = init::init(&current_dir, args.backend.as_deref()).await?;

    if !args.quiet {
        println!("Initialized dagscope in {}", result.dagscope_dir.display());
        println!("  Config:  {}", result.config_file.display());
        println!("  Graph:   {}", result.graph_file.display());
        println!("  Backend: {}", result.backend);
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let model = app.session().model();
    let (backend, data_file) = match app.backend() {
        Some(StoreBackend::Jsonl(path)) => ("jsonl", Some(path.display().to_string())),
        Some(StoreBackend::InMemory) | None => ("memory", None),
    };

    match output_mode {
        OutputMode::Json => {
            let warnings = output::warnings_json(app.load_warnings(), app.store_warnings());
            output::print_json(&serde_json::json!({
                "dagscope_dir": app.dagscope_dir().display().to_string(),
                "backend": backend,
                "data_file": data_file,
                "nodes": model.node_count(),
                "edges": model.edge_count(),
                "warnings": warnings,
            }))?;
        }
        OutputMode::Text => {
            println!("Dagscope Repository Information");
            println!("===============================");
            println!();
            println!("Directory: {}", app.dagscope_dir().display());
            println!("Backend:   {backend}");
            if let Some(path) = &data_file {
                println!("Data file: {path}");
            }
            println!();
            println!("Graph: {} nodes, {} edges", model.node_count(), model.edge_count());
            report_warnings(app, output_mode)?;
        }
    }

    Ok(())
}

/// Build the event list for the view command in application order.
pub(crate) fn view_events(args: &ViewArgs) -> Vec<ViewEvent> {
    let collapses = args
        .collapse
        .iter()
        .map(|id| ViewEvent::ToggleCollapse(NodeId::new(id.as_str())));
    let selects = args
        .select
        .iter()
        .map(|id| ViewEvent::Select(NodeId::new(id.as_str())));
    let clear = args.clear.then_some(ViewEvent::ClearSelection);

    collapses.chain(selects).chain(clear).collect()
}

/// Execute the view command
pub async fn execute_view(app: &mut App, args: &ViewArgs, output_mode: OutputMode) -> Result<()> {
    report_warnings(app, output_mode)?;

    for event in view_events(args) {
        if let ViewEvent::ToggleCollapse(id) | ViewEvent::Select(id) = &event
            && !app.session().model().contains(id)
        {
            tracing::warn!(node = %id, "Ignoring unknown node");
        }
        app.apply(&event);
    }

    let view = app.view();
    let warnings = output::warnings_json(app.load_warnings(), app.store_warnings());
    output::print_view(app.session(), &view, warnings, output_mode)?;
    Ok(())
}

/// Execute the ancestors command
pub async fn execute_ancestors(app: &App, args: &NodeArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(args.node_id.as_str());
    app.session().model().require(&id)?;

    let ancestors = all_ancestors(app.session().model(), &id);
    output::print_ancestors(&id, &ancestors, output_mode)?;
    Ok(())
}

/// Execute the upstream command
pub async fn execute_upstream(app: &App, args: &NodeArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(args.node_id.as_str());
    app.session().model().require(&id)?;

    let closure = upstream_closure(app.session().model(), &id);
    output::print_closure(&id, &closure, output_mode)?;
    Ok(())
}

/// Execute the move command
pub async fn execute_move(app: &mut App, args: &MoveArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(args.node_id.as_str());
    let position = Position::new(args.x, args.y);
    let saved = app.move_node(&id, position).await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "node": id,
                "position": position,
                "saved": saved,
            }))?;
        }
        OutputMode::Text => {
            let config = output::OutputConfig::from_env();
            if saved {
                println!(
                    "{} {} to ({}, {})",
                    output::success("Moved", &config),
                    output::info(id.as_str(), &config),
                    position.x,
                    position.y
                );
            } else {
                println!(
                    "{} position of {} was not saved",
                    output::warning("Warning:", &config),
                    output::info(id.as_str(), &config)
                );
            }
        }
    }

    Ok(())
}

/// Execute the import command
pub async fn execute_import(app: &mut App, args: &ImportArgs, output_mode: OutputMode) -> Result<()> {
    let (summary, warnings) = app.import_file(&args.file).await?;

    match output_mode {
        OutputMode::Json => {
            let warnings = output::warnings_json(&[], &warnings);
            output::print_json(&serde_json::json!({
                "file": args.file.display().to_string(),
                "summary": summary,
                "warnings": warnings,
            }))?;
        }
        OutputMode::Text => {
            output::print_warnings(&[], &warnings)?;
            let config = output::OutputConfig::from_env();
            println!(
                "{} {} nodes and {} edges from {}",
                output::success("Imported", &config),
                summary.nodes,
                summary.edges,
                args.file.display()
            );
            if summary.replaced_rows > 0 || summary.skipped_rows > 0 || summary.duplicate_edges > 0 {
                println!(
                    "  {} replaced rows, {} skipped rows, {} duplicate edges",
                    summary.replaced_rows, summary.skipped_rows, summary.duplicate_edges
                );
            }
        }
    }

    Ok(())
}

/// Execute the reset command
pub async fn execute_reset(app: &mut App, args: &ResetArgs, output_mode: OutputMode) -> Result<()> {
    let model = app.session().model();
    let (nodes, edges) = (model.node_count(), model.edge_count());

    // Confirm unless --force is used
    if !args.force {
        eprint!("Remove all {nodes} nodes and {edges} edges? [y/N]: ");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let response = input.trim().to_lowercase();
        if response != "y" && response != "yes" {
            match output_mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "status": "cancelled"
                }))?,
                OutputMode::Text => println!("Reset cancelled."),
            }
            return Ok(());
        }
    }

    app.reset().await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "removed_nodes": nodes,
                "removed_edges": edges,
                "status": "success"
            }))?;
        }
        OutputMode::Text => {
            let config = output::OutputConfig::from_env();
            println!(
                "{} {nodes} nodes and {edges} edges",
                output::success("Removed", &config)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_events_follow_fixed_order() {
        let args = ViewArgs {
            collapse: vec!["c".to_string(), "d".to_string()],
            select: vec!["b".to_string()],
            clear: true,
        };

        assert_eq!(
            view_events(&args),
            vec![
                ViewEvent::ToggleCollapse(NodeId::from("c")),
                ViewEvent::ToggleCollapse(NodeId::from("d")),
                ViewEvent::Select(NodeId::from("b")),
                ViewEvent::ClearSelection,
            ]
        );
    }

    #[test]
    fn view_events_empty_by_default() {
        let args = ViewArgs {
            collapse: vec![],
            select: vec![],
            clear: false,
        };
        assert!(view_events(&args).is_empty());
    }
}
