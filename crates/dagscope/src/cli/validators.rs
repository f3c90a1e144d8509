//! Input validation for CLI arguments.
//!
//! Used as clap `value_parser`s so bad input is rejected before any store is
//! opened.

use crate::config::{BACKEND_JSONL, BACKEND_MEMORY};

/// Validate a node ID argument.
///
/// Surrounding whitespace is trimmed. Node IDs are otherwise free-form, but
/// they cannot be empty and cannot contain `|`, which separates the two
/// endpoints of an edge ID.
pub fn validate_node_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Node ID cannot be empty".to_string());
    }

    if s.contains('|') {
        return Err(format!(
            "Invalid node ID '{s}': '|' is reserved as the edge ID separator"
        ));
    }

    Ok(s.to_string())
}

/// Validate a store backend argument.
pub fn validate_backend_arg(s: &str) -> Result<String, String> {
    let s = s.trim();
    crate::commands::init::validate_backend(s).map_err(|_| {
        format!("Backend must be '{BACKEND_JSONL}' or '{BACKEND_MEMORY}', got '{s}'")
    })?;
    Ok(s.to_string())
}

/// Validate a canvas coordinate (must be finite).
pub fn validate_coordinate(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid coordinate '{s}': expected a number"))?;

    if !value.is_finite() {
        return Err(format!("Invalid coordinate '{s}': must be finite"));
    }

    Ok(value)
}
