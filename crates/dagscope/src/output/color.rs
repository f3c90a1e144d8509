//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (completed actions)
//!   - Warning:   yellow  (highlighted ancestry, load warnings)
//!   - Info:      cyan    (node IDs)
//!   - Muted:     dimmed  (field labels, edge arrows)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Colorize a node ID, bold yellow when it sits on the highlighted chain.
pub(crate) fn colorize_node(id: &str, highlighted: bool, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    if highlighted {
        id.yellow().bold().to_string()
    } else {
        id.cyan().to_string()
    }
}

/// Bold text for section headers.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Dimmed text for labels and connectors.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig { use_colors: false }
    }

    #[test]
    fn helpers_pass_text_through_without_colors() {
        let config = plain();
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(warning("hmm", &config), "hmm");
        assert_eq!(info("id", &config), "id");
        assert_eq!(bold("Title", &config), "Title");
        assert_eq!(dimmed("->", &config), "->");
        assert_eq!(colorize_node("orders", true, &config), "orders");
    }

    #[test]
    fn highlighted_nodes_are_styled_differently() {
        colored::control::set_override(true);
        let config = OutputConfig { use_colors: true };
        let plain_node = colorize_node("orders", false, &config);
        let chain_node = colorize_node("orders", true, &config);
        colored::control::unset_override();

        assert_ne!(plain_node, chain_node);
        assert!(chain_node.contains("orders"));
    }
}
