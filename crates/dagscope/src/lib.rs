//! Dagscope - explore job dependency graphs from the command line.
//!
//! This crate wraps the [`dagscope_core`] view engine with the I/O it needs:
//! a graph store (graph source, position sink, bulk import and reset), YAML
//! configuration, an application context and a CLI.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod config;
pub mod error;
pub mod store;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Output formatting
pub mod output;
