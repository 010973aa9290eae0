//! Caller-owned view state and annotated rendering.
//!
//! The algorithms never touch these collections; the session replaces them
//! wholesale with fresh results.

use std::collections::{BTreeSet, HashMap};

use colored::Colorize;
use termtree::Tree;

use crate::domain::TreeNode;

/// Which annotations are shown next to each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_ids: bool,
    pub show_values: bool,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_values: true,
            color: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Nodes revealed or focused, e.g. by traversal playback or search
    pub highlighted: BTreeSet<String>,
    /// Visit rank per node of the last traversal
    pub visit_rank: HashMap<String, usize>,
    /// Result of the last balance check
    pub unbalanced: BTreeSet<String>,
    /// Nodes on the last computed path
    pub path_nodes: BTreeSet<String>,
    /// Nodes whose children are hidden
    pub collapsed: BTreeSet<String>,
    /// Node picked for the metadata view
    pub selected: Option<String>,
}

impl ViewState {
    /// Drops every algorithm result; collapse state is kept.
    pub fn clear_results(&mut self) {
        self.highlighted.clear();
        self.visit_rank.clear();
        self.unbalanced.clear();
        self.path_nodes.clear();
    }

    /// Flips the collapsed state of `id`, returning whether it is now collapsed.
    pub fn toggle_collapse(&mut self, id: &str) -> bool {
        if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.to_string());
            true
        }
    }

    fn node_text(&self, node: &TreeNode, options: &RenderOptions) -> String {
        let mut text = node.label.clone();
        if options.show_ids {
            text.push_str(&format!(" [{}]", node.id));
        }
        if options.show_values {
            if let Some(value) = node.value {
                text.push_str(&format!(" = {value}"));
            }
        }

        let mut marks = Vec::new();
        if let Some(rank) = self.visit_rank.get(&node.id) {
            marks.push(format!("#{rank}"));
        }
        if self.unbalanced.contains(&node.id) {
            marks.push("unbalanced".to_string());
        }
        if self.path_nodes.contains(&node.id) {
            marks.push("path".to_string());
        }
        if self.collapsed.contains(&node.id) && !node.is_leaf() {
            marks.push(format!("+{} hidden", node.node_count() - 1));
        }
        if !marks.is_empty() {
            text.push_str(&format!(" ({})", marks.join(", ")));
        }

        if !options.color {
            return text;
        }
        if self.unbalanced.contains(&node.id) {
            text.red().bold().to_string()
        } else if self.path_nodes.contains(&node.id) {
            text.green().bold().to_string()
        } else if self.highlighted.contains(&node.id) {
            text.yellow().to_string()
        } else {
            text
        }
    }

    /// Renders `root` with this view's annotations; collapsed nodes hide their subtrees.
    ///
    /// Recursive over the tree depth. Trees loaded from JSON are at most 128
    /// levels deep (serde_json recursion limit), which bounds the recursion.
    pub fn render_tree(&self, root: &TreeNode, options: &RenderOptions) -> Tree<String> {
        let mut tree = Tree::new(self.node_text(root, options));
        if !self.collapsed.contains(&root.id) {
            for child in root.children() {
                tree.push(self.render_tree(child, options));
            }
        }
        tree
    }
}
