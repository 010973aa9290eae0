//! Shortest path between two nodes through their lowest common ancestor.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::node::TreeNode;

/// Ancestors of both ends, each listed from the node up to the root.
struct RootPaths {
    from_start: Vec<Index>,
    from_end: Vec<Index>,
}

fn root_paths(arena: &TreeArena<'_>, start_id: &str, end_id: &str) -> Option<RootPaths> {
    let start = arena.index_of(start_id)?;
    let end = arena.index_of(end_id)?;
    Some(RootPaths {
        from_start: arena.path_to_root(start).map(|(idx, _)| idx).collect(),
        from_end: arena.path_to_root(end).map(|(idx, _)| idx).collect(),
    })
}

/// Position of the LCA in `from_start` and `from_end`.
fn lca_positions(paths: &RootPaths) -> Option<(usize, usize)> {
    let start_set: HashSet<Index> = paths.from_start.iter().copied().collect();
    let end_pos = paths
        .from_end
        .iter()
        .position(|idx| start_set.contains(idx))?;
    let lca = paths.from_end[end_pos];
    let start_pos = paths.from_start.iter().position(|&idx| idx == lca)?;
    Some((start_pos, end_pos))
}

/// Deepest node that is an ancestor of both `a` and `b` (a node is its own ancestor).
pub fn lowest_common_ancestor(root: &TreeNode, a: &str, b: &str) -> Option<String> {
    let arena = TreeArena::build(root);
    let paths = root_paths(&arena, a, b)?;
    let (start_pos, _) = lca_positions(&paths)?;
    arena
        .get_node(paths.from_start[start_pos])
        .map(|node| node.id().to_string())
}

/// Unique simple path from `start_id` to `end_id`, both inclusive.
///
/// Returns an empty vector when either id is not part of the tree.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn find_shortest_path(root: &TreeNode, start_id: &str, end_id: &str) -> Vec<String> {
    let arena = TreeArena::build(root);
    let Some(paths) = root_paths(&arena, start_id, end_id) else {
        debug!("no path: endpoint not in tree");
        return Vec::new();
    };
    let Some((start_pos, end_pos)) = lca_positions(&paths) else {
        return Vec::new();
    };

    let id_of = |idx: &Index| arena.get_node(*idx).map(|node| node.id().to_string());
    let path: Vec<String> = paths.from_start[..=start_pos]
        .iter()
        .chain(paths.from_end[..end_pos].iter().rev())
        .filter_map(id_of)
        .collect();

    debug!("path of {} nodes", path.len());
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    //      r
    //     / \
    //    a   b
    //   / \
    //  c   d
    fn small_tree() -> TreeNode {
        TreeNode::with_children(
            "r",
            "root",
            None,
            vec![
                TreeNode::with_children(
                    "a",
                    "a",
                    None,
                    vec![TreeNode::leaf("c", "c", None), TreeNode::leaf("d", "d", None)],
                ),
                TreeNode::leaf("b", "b", None),
            ],
        )
    }

    #[test]
    fn given_siblings_when_finding_path_then_goes_through_parent() {
        assert_eq!(find_shortest_path(&small_tree(), "c", "d"), vec!["c", "a", "d"]);
    }

    #[test]
    fn given_ancestor_as_end_when_finding_path_then_walks_up_only() {
        assert_eq!(find_shortest_path(&small_tree(), "d", "r"), vec!["d", "a", "r"]);
    }

    #[test]
    fn given_ancestor_as_start_when_finding_path_then_walks_down_only() {
        assert_eq!(find_shortest_path(&small_tree(), "r", "c"), vec!["r", "a", "c"]);
    }

    #[test]
    fn given_missing_id_when_finding_path_then_empty() {
        assert!(find_shortest_path(&small_tree(), "c", "zz").is_empty());
        assert!(find_shortest_path(&small_tree(), "zz", "zz").is_empty());
    }

    #[test]
    fn given_two_nodes_when_computing_lca_then_deepest_shared_ancestor() {
        let tree = small_tree();
        assert_eq!(lowest_common_ancestor(&tree, "c", "d").as_deref(), Some("a"));
        assert_eq!(lowest_common_ancestor(&tree, "c", "b").as_deref(), Some("r"));
        assert_eq!(lowest_common_ancestor(&tree, "c", "c").as_deref(), Some("c"));
        assert_eq!(lowest_common_ancestor(&tree, "c", "x"), None);
    }
}
