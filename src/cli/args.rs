//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::cli::CliError;

/// Tree explorer: traversal ranks, shortest paths, balance diagnosis and max-heap conversion
#[derive(Parser, Debug)]
#[command(name = "rstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// JSON tree file (overrides config; default: built-in sample tree)
    #[arg(short, long, global = true, env = "RSTREE_TREE", value_hint = ValueHint::FilePath)]
    pub tree: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the tree
    ///
    /// Tree files are read with a nesting limit of 128 levels (serde_json recursion limit).
    Show {
        /// Collapse these nodes (hide their subtrees)
        #[arg(short, long, num_args = 1..)]
        collapse: Vec<String>,
    },

    /// Depth-first (preorder) traversal with visit ranks
    Dfs {
        /// Reveal nodes one at a time
        #[arg(short, long)]
        animate: bool,
    },

    /// Breadth-first (level-order) traversal with visit ranks
    Bfs {
        /// Reveal nodes one at a time
        #[arg(short, long)]
        animate: bool,
    },

    /// Shortest path between two nodes
    Path {
        /// Start node id
        start: String,
        /// End node id
        end: String,
    },

    /// Report nodes whose children's heights differ by more than one
    Balance,

    /// Convert to a max heap (complete binary tree)
    Heap {
        /// Write the result back to the tree file
        #[arg(short, long)]
        write: bool,
    },

    /// Show one node's metadata
    Find {
        /// Node id
        id: String,
    },

    /// Search nodes by id, label or value
    Search {
        /// Search text
        query: String,
    },

    /// Set a node's value
    SetValue {
        /// Node id
        id: String,
        /// New value
        #[arg(allow_negative_numbers = true, value_parser = parse_finite_value)]
        value: f64,
        /// Write the result back to the tree file
        #[arg(short, long)]
        write: bool,
    },

    /// Append a new leaf to a node
    AddChild {
        /// Parent node id
        parent: String,
        /// Value of the new node
        #[arg(long, allow_negative_numbers = true, value_parser = parse_finite_value)]
        value: Option<f64>,
        /// Write the result back to the tree file
        #[arg(short, long)]
        write: bool,
    },

    /// Print the tree as JSON
    Export,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

/// Node values must survive a JSON round trip, so `inf`, `-inf` and `NaN` are rejected.
fn parse_finite_value(s: &str) -> Result<f64, CliError> {
    let value: f64 = s
        .parse()
        .map_err(|e| CliError::InvalidArgs(format!("{s:?} is not a number: {e}")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CliError::InvalidArgs(format!("value must be finite, got {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_finite_text_when_parsing_value_then_accepted() {
        assert_eq!(parse_finite_value("-7.5").unwrap(), -7.5);
        assert_eq!(parse_finite_value("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn given_non_finite_text_when_parsing_value_then_invalid_args() {
        for text in ["inf", "-inf", "NaN", "infinity"] {
            assert!(
                matches!(parse_finite_value(text), Err(CliError::InvalidArgs(_))),
                "{text} should be rejected"
            );
        }
        assert!(matches!(parse_finite_value("abc"), Err(CliError::InvalidArgs(_))));
    }
}
