//! Interactive session state: the current tree, the active mode and the
//! view state derived from the last algorithm run.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::application::playback::{PlaybackStep, TraversalPlayback};
use crate::application::view::ViewState;
use crate::application::ApplicationResult;
use crate::domain::{self, TraversalKind, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Dfs,
    Bfs,
    Path,
    Balance,
    Heap,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "normal",
            Mode::Dfs => "dfs",
            Mode::Bfs => "bfs",
            Mode::Path => "path",
            Mode::Balance => "balance",
            Mode::Heap => "heap",
        };
        write!(f, "{name}")
    }
}

impl From<TraversalKind> for Mode {
    fn from(kind: TraversalKind) -> Self {
        match kind {
            TraversalKind::Dfs => Mode::Dfs,
            TraversalKind::Bfs => Mode::Bfs,
        }
    }
}

/// Owns the tree and all mutable view state; algorithms only see `&TreeNode`.
#[derive(Debug, Clone)]
pub struct TreeSession {
    tree: TreeNode,
    mode: Mode,
    view: ViewState,
    path_start: Option<String>,
    status: Option<String>,
}

impl TreeSession {
    pub fn new(tree: TreeNode) -> Self {
        Self {
            tree,
            mode: Mode::Normal,
            view: ViewState::default(),
            path_start: None,
            status: None,
        }
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn into_tree(self) -> TreeNode {
        self.tree
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn path_start(&self) -> Option<&str> {
        self.path_start.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.status = Some(message);
    }

    /// Computes the traversal up front and returns its playback.
    #[instrument(level = "debug", skip(self))]
    pub fn run_traversal(&mut self, kind: TraversalKind) -> TraversalPlayback {
        self.mode = kind.into();
        self.view.clear_results();
        self.path_start = None;

        let traversal = domain::traverse(&self.tree, kind);
        self.view.visit_rank = traversal.visit_rank.clone();
        self.set_status(format!("Running {kind} traversal..."));
        TraversalPlayback::new(kind, &traversal)
    }

    /// Reveals one playback step in the highlight set.
    pub fn apply_step(&mut self, step: &PlaybackStep) {
        if let PlaybackStep::Visit { id, .. } = step {
            self.view.highlighted.insert(id.clone());
        }
        self.set_status(step.message());
    }

    pub fn start_path_mode(&mut self) {
        self.mode = Mode::Path;
        self.path_start = None;
        self.view.clear_results();
        self.set_status("Click two nodes to find path");
    }

    /// Handles a node selection.
    ///
    /// In path mode the first selection becomes the start, a second, different
    /// selection computes the path; re-selecting the start is ignored.
    /// Returns the path when one was computed.
    #[instrument(level = "debug", skip(self))]
    pub fn select_node(&mut self, id: &str) -> Option<Vec<String>> {
        if self.mode != Mode::Path {
            self.view.selected = Some(id.to_string());
            return None;
        }

        match self.path_start.take() {
            None => {
                self.path_start = Some(id.to_string());
                self.view.highlighted = [id.to_string()].into();
                self.set_status("Select second node for path...");
                None
            }
            Some(start) if start == id => {
                debug!("same node selected twice, waiting for second node");
                self.path_start = Some(start);
                None
            }
            Some(start) => {
                let path = domain::find_shortest_path(&self.tree, &start, id);
                self.view.path_nodes = path.iter().cloned().collect();
                self.set_status(format!("Path found: {} nodes", path.len()));
                Some(path)
            }
        }
    }

    pub fn check_balance(&mut self) -> &ViewState {
        self.mode = Mode::Balance;
        self.view.clear_results();
        self.path_start = None;

        self.view.unbalanced = domain::check_balance(&self.tree);
        if self.view.unbalanced.is_empty() {
            self.set_status("Tree is balanced!");
        } else {
            self.set_status(format!("Found {} unbalanced node(s)", self.view.unbalanced.len()));
        }
        &self.view
    }

    pub fn convert_to_heap(&mut self) -> &TreeNode {
        self.mode = Mode::Heap;
        self.view.clear_results();
        // Every id changes, so collapse and selection state would dangle
        self.view.collapsed.clear();
        self.view.selected = None;
        self.path_start = None;

        self.tree = domain::convert_to_max_heap(&self.tree);
        self.set_status("Converted to Max Heap!");
        &self.tree
    }

    /// Focuses a search hit: only that node is highlighted and selected.
    pub fn focus_node(&mut self, id: &str) {
        self.mode = Mode::Normal;
        self.view.clear_results();
        self.path_start = None;
        self.view.highlighted.insert(id.to_string());
        self.view.selected = Some(id.to_string());
        self.set_status(format!("Found node: {id}"));
    }

    pub fn update_node_value(&mut self, id: &str, value: f64) -> ApplicationResult<()> {
        self.tree = domain::update_node_value(&self.tree, id, value)?;
        self.set_status(format!("Updated node value to {value}"));
        Ok(())
    }

    /// Appends a new leaf under `parent_id` and returns the new node's id.
    pub fn add_child(&mut self, parent_id: &str, value: Option<f64>) -> ApplicationResult<String> {
        let (tree, id) = domain::add_child(&self.tree, parent_id, value)?;
        self.tree = tree;
        self.set_status(format!("Added new child node to {parent_id}"));
        Ok(id)
    }

    pub fn toggle_collapse(&mut self, id: &str) -> bool {
        self.view.toggle_collapse(id)
    }

    /// Starts over with a freshly loaded tree.
    pub fn reset(&mut self, tree: TreeNode) {
        self.tree = tree;
        self.mode = Mode::Normal;
        self.view.clear_results();
        self.path_start = None;
        self.set_status("Resetting tree...");
    }
}
