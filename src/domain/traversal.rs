//! Preorder and level-order traversal with 1-based visit ranks.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::node::TreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    /// Depth-first, preorder
    Dfs,
    /// Breadth-first, level order
    Bfs,
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalKind::Dfs => write!(f, "DFS"),
            TraversalKind::Bfs => write!(f, "BFS"),
        }
    }
}

/// Result of a traversal: visitation sequence plus each id's rank in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Node ids in visitation order
    pub order: Vec<String>,
    /// 1-based visit rank per node id
    pub visit_rank: HashMap<String, usize>,
}

impl Traversal {
    fn from_visits<'a>(visits: impl Iterator<Item = &'a str>) -> Self {
        let mut traversal = Traversal::default();
        for (i, id) in visits.enumerate() {
            traversal.order.push(id.to_string());
            traversal.visit_rank.insert(id.to_string(), i + 1);
        }
        traversal
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.visit_rank.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Preorder traversal: a node is ranked before its children, children left to right.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn dfs_traversal(root: &TreeNode) -> Traversal {
    let arena = TreeArena::build(root);
    let traversal = Traversal::from_visits(arena.iter().map(|(_, node)| node.id()));
    debug!("dfs visited {} nodes", traversal.len());
    traversal
}

/// Level-order traversal driven by a FIFO queue seeded with the root.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn bfs_traversal(root: &TreeNode) -> Traversal {
    let arena = TreeArena::build(root);
    let traversal = Traversal::from_visits(arena.iter_level_order().map(|(_, node)| node.id()));
    debug!("bfs visited {} nodes", traversal.len());
    traversal
}

pub fn traverse(root: &TreeNode, kind: TraversalKind) -> Traversal {
    match kind {
        TraversalKind::Dfs => dfs_traversal(root),
        TraversalKind::Bfs => bfs_traversal(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_node_when_traversing_then_single_rank() {
        let root = TreeNode::leaf("only", "Only", None);

        for kind in [TraversalKind::Dfs, TraversalKind::Bfs] {
            let traversal = traverse(&root, kind);
            assert_eq!(traversal.order, vec!["only"]);
            assert_eq!(traversal.rank("only"), Some(1));
        }
    }

    #[test]
    fn given_unknown_id_when_looking_up_rank_then_none() {
        let root = TreeNode::leaf("only", "Only", None);
        assert_eq!(dfs_traversal(&root).rank("other"), None);
    }

    #[test]
    fn given_kind_when_displayed_then_uppercase_name() {
        assert_eq!(TraversalKind::Dfs.to_string(), "DFS");
        assert_eq!(TraversalKind::Bfs.to_string(), "BFS");
    }
}
