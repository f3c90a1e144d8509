//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{validate_backend_arg, validate_coordinate, validate_node_id};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Store backend ("jsonl" or "memory")
    ///
    /// The memory backend keeps nothing between invocations and is mostly
    /// useful for trying the tool out.
    #[arg(short, long, value_parser = validate_backend_arg)]
    pub backend: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `view` command
///
/// Events are applied in a fixed order: every collapse toggle, then every
/// selection, then the clear.
#[derive(Parser, Debug, Clone)]
pub struct ViewArgs {
    /// Toggle collapse on a node (repeatable)
    #[arg(short, long, value_parser = validate_node_id)]
    pub collapse: Vec<String>,

    /// Select a node (repeatable; selecting the same node twice clears)
    #[arg(short, long, value_parser = validate_node_id)]
    pub select: Vec<String>,

    /// Clear the selection after applying the other events
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for commands that take a single node (`ancestors`, `upstream`)
#[derive(Parser, Debug, Clone)]
pub struct NodeArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,
}

/// Arguments for the `move` command
#[derive(Parser, Debug, Clone)]
pub struct MoveArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,

    /// New x coordinate
    #[arg(long, allow_hyphen_values = true, value_parser = validate_coordinate)]
    pub x: f64,

    /// New y coordinate
    #[arg(long, allow_hyphen_values = true, value_parser = validate_coordinate)]
    pub y: f64,
}

/// Arguments for the `import` command
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// JSONL file with one row per object
    pub file: PathBuf,
}

/// Arguments for the `reset` command
#[derive(Parser, Debug, Clone)]
pub struct ResetArgs {
    /// Actually clear the store
    #[arg(short, long)]
    pub force: bool,
}
