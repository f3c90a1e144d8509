//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for dagscope using clap's
//! derive API. Each command has its own argument struct.
//!
//! # Commands
//!
//! - `init`: Initialize a new dagscope repository
//! - `info`: Show store location, graph size and load warnings
//! - `view`: Apply collapse/select events and print the projection
//! - `ancestors`: List every ancestor of a node
//! - `upstream`: Show the nodes and edges a collapse would hide
//! - `move`: Persist a node position
//! - `import`: Replace the graph from a JSONL file
//! - `reset`: Clear the graph
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! dagscope import jobs.jsonl
//! dagscope view --collapse daily_sales --select weekly_report
//! dagscope ancestors weekly_report
//! dagscope move orders --x 120 --y -40
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{ImportArgs, InfoArgs, InitArgs, MoveArgs, NodeArgs, ResetArgs, ViewArgs};
pub use validators::{validate_coordinate, validate_node_id};

/// Dagscope - explore job dependency graphs from the terminal
///
/// Collapse upstream subgraphs, highlight a node's ancestry and keep node
/// positions in `.dagscope/graph.jsonl`.
#[derive(Parser, Debug)]
#[command(name = "dagscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new dagscope repository
    ///
    /// Creates the `.dagscope/` directory with configuration and an empty
    /// graph file. Run this once in your project root.
    Init(InitArgs),

    /// Show repository information
    ///
    /// Displays the store backend, data file, graph size and any warnings
    /// raised while loading.
    Info(InfoArgs),

    /// Print the current view of the graph
    ///
    /// Applies collapse toggles, then selections, then an optional clear,
    /// and prints the visible nodes and edges with their highlight flags.
    View(ViewArgs),

    /// List all ancestors of a node
    Ancestors(NodeArgs),

    /// Show the upstream closure of a node
    ///
    /// Lists every node and edge that collapsing the node would hide.
    Upstream(NodeArgs),

    /// Move a node to a new canvas position
    Move(MoveArgs),

    /// Import a graph from a JSONL file
    ///
    /// Replaces all stored nodes and edges. Each line is one object with
    /// `object`, `depends_on` and optional metadata columns.
    Import(ImportArgs),

    /// Remove all nodes and edges
    ///
    /// Use `--force` to skip confirmation.
    Reset(ResetArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::View(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_view(&mut app, args, output_mode).await
            }
            Some(Commands::Ancestors(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_ancestors(&app, args, output_mode).await
            }
            Some(Commands::Upstream(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_upstream(&app, args, output_mode).await
            }
            Some(Commands::Move(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_move(&mut app, args, output_mode).await
            }
            Some(Commands::Import(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_import(&mut app, args, output_mode).await
            }
            Some(Commands::Reset(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_reset(&mut app, args, output_mode).await
            }
            None => {
                println!("Dagscope dependency graph explorer");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["dagscope"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["dagscope", "view", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::View(_))));
    }

    #[test]
    fn test_parse_init_default() {
        let cli = Cli::try_parse_from(["dagscope", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.backend.is_none());
                assert!(!args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_init_with_backend() {
        let cli = Cli::try_parse_from(["dagscope", "init", "--backend", "memory", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.backend.as_deref(), Some("memory"));
                assert!(args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_init_invalid_backend() {
        let result = Cli::try_parse_from(["dagscope", "init", "--backend", "sqlite"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_view_repeated_flags() {
        let cli = Cli::try_parse_from([
            "dagscope", "view", "-c", "a", "--collapse", "b", "--select", "c", "--clear",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::View(args)) => {
                assert_eq!(args.collapse, vec!["a", "b"]);
                assert_eq!(args.select, vec!["c"]);
                assert!(args.clear);
            }
            _ => panic!("Expected View command"),
        }
    }

    #[test]
    fn test_parse_ancestors_requires_node() {
        assert!(Cli::try_parse_from(["dagscope", "ancestors"]).is_err());

        let cli = Cli::try_parse_from(["dagscope", "ancestors", " orders "]).unwrap();
        match cli.command {
            Some(Commands::Ancestors(args)) => assert_eq!(args.node_id, "orders"),
            _ => panic!("Expected Ancestors command"),
        }
    }

    #[test]
    fn test_parse_upstream() {
        let cli = Cli::try_parse_from(["dagscope", "--json", "upstream", "daily"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Upstream(_))));
    }

    #[test]
    fn test_parse_move_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["dagscope", "move", "orders", "--x", "-12.5", "--y", "40"]).unwrap();
        match cli.command {
            Some(Commands::Move(args)) => {
                assert_eq!(args.node_id, "orders");
                assert!((args.x + 12.5).abs() < f64::EPSILON);
                assert!((args.y - 40.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected Move command"),
        }
    }

    #[test]
    fn test_parse_move_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["dagscope", "move", "orders", "--x", "1"]).is_err());
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from(["dagscope", "import", "jobs.jsonl"]).unwrap();
        match cli.command {
            Some(Commands::Import(args)) => {
                assert_eq!(args.file, std::path::PathBuf::from("jobs.jsonl"));
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_parse_reset_force() {
        let cli = Cli::try_parse_from(["dagscope", "reset", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Reset(args)) => assert!(args.force),
            _ => panic!("Expected Reset command"),
        }
    }
}
