//! Copy-on-write edits.
//!
//! An edit rebuilds only the nodes on the path from the edited node up to the
//! root; every other subtree of the new tree is the same `Arc` as in the old
//! one.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::TreeNode;

/// Replaces node `target_id` by `edit(node)` and rebuilds its ancestors.
fn rebuild_path<F>(root: &TreeNode, target_id: &str, edit: F) -> DomainResult<TreeNode>
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    let arena = TreeArena::build(root);
    let target = arena
        .index_of(target_id)
        .ok_or_else(|| DomainError::NodeNotFound(target_id.to_string()))?;

    // target, parent, ..., root
    let path: Vec<_> = arena.path_to_root(target).map(|(_, node)| node).collect();
    let (first, ancestors) = path
        .split_first()
        .ok_or_else(|| DomainError::NodeNotFound(target_id.to_string()))?;

    let mut rebuilt = edit(first.node);
    let mut position = first.position;
    for ancestor in ancestors {
        let mut parent = ancestor.node.clone();
        if let Some(children) = parent.children.as_mut() {
            children[position] = Arc::new(rebuilt);
        }
        rebuilt = parent;
        position = ancestor.position;
    }

    debug!(target = target_id, rebuilt = path.len(), "copy-on-write edit");
    Ok(rebuilt)
}

/// New tree in which node `id` carries `value`.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn update_node_value(root: &TreeNode, id: &str, value: f64) -> DomainResult<TreeNode> {
    rebuild_path(root, id, |node| {
        let mut updated = node.clone();
        updated.value = Some(value);
        updated
    })
}

/// Next free id: one above the largest numeric id, skipping ids already in use.
pub fn next_node_id(root: &TreeNode) -> String {
    let arena = TreeArena::build(root);
    let mut candidate = arena
        .iter()
        .filter_map(|(_, node)| node.id().parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1);
    while arena.index_of(&candidate.to_string()).is_some() {
        candidate += 1;
    }
    candidate.to_string()
}

/// New tree in which `parent_id` has an extra last child `N{id}`.
///
/// Returns the new tree and the id assigned to the child.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn add_child(
    root: &TreeNode,
    parent_id: &str,
    value: Option<f64>,
) -> DomainResult<(TreeNode, String)> {
    let new_id = next_node_id(root);
    let child = Arc::new(TreeNode::leaf(new_id.clone(), format!("N{new_id}"), value));

    let tree = rebuild_path(root, parent_id, |node| {
        let mut updated = node.clone();
        updated.children.get_or_insert_with(Vec::new).push(child);
        updated
    })?;
    Ok((tree, new_id))
}
