//! Height-balance diagnosis.

use std::collections::{BTreeSet, HashMap};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::node::TreeNode;

/// Per-node subtree heights and the ids of locally unbalanced nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReport {
    /// Subtree height per node id (a leaf has height 1)
    pub heights: HashMap<String, usize>,
    /// Internal nodes whose children's heights differ by more than one
    pub unbalanced: BTreeSet<String>,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.unbalanced.is_empty()
    }

    pub fn height(&self, id: &str) -> Option<usize> {
        self.heights.get(id).copied()
    }
}

/// Computes every subtree height once, bottom-up, and checks each internal node.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn analyze_balance(root: &TreeNode) -> BalanceReport {
    let arena = TreeArena::build(root);
    let mut heights: HashMap<Index, usize> = HashMap::with_capacity(arena.len());
    let mut report = BalanceReport::default();

    for (idx, node) in arena.iter_postorder() {
        // Children precede their parent in post-order, so their heights are known
        let child_heights: Vec<usize> = node
            .children
            .iter()
            .map(|child| heights.get(child).copied().unwrap_or(0))
            .collect();

        let height = match (child_heights.iter().min(), child_heights.iter().max()) {
            (Some(&min), Some(&max)) => {
                if max - min > 1 {
                    debug!(id = node.id(), min, max, "unbalanced");
                    report.unbalanced.insert(node.id().to_string());
                }
                1 + max
            }
            _ => 1,
        };

        heights.insert(idx, height);
        report.heights.insert(node.id().to_string(), height);
    }

    report
}

/// Ids of all nodes whose children's subtree heights differ by more than one.
pub fn check_balance(root: &TreeNode) -> BTreeSet<String> {
    analyze_balance(root).unbalanced
}

/// Height of the whole tree: 1 for a single leaf.
pub fn subtree_height(root: &TreeNode) -> usize {
    TreeArena::build(root).depth()
}
