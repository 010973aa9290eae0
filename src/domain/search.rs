//! Node lookup and tree validation for data sources.

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::TreeNode;

pub fn find_node<'t>(root: &'t TreeNode, id: &str) -> Option<&'t TreeNode> {
    let arena = TreeArena::build(root);
    arena
        .index_of(id)
        .and_then(|idx| arena.get_node(idx))
        .map(|entry| entry.node)
}

/// Nodes matching `query`, in preorder.
///
/// Labels match case-insensitively, ids match the lower-cased query, and
/// values match on their decimal text.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn search_nodes<'t>(root: &'t TreeNode, query: &str) -> Vec<&'t TreeNode> {
    let lower_query = query.to_lowercase();
    TreeArena::build(root)
        .iter()
        .map(|(_, entry)| entry.node)
        .filter(|node| {
            node.label.to_lowercase().contains(&lower_query)
                || node.id.contains(&lower_query)
                || node
                    .value
                    .is_some_and(|value| value.to_string().contains(query))
        })
        .collect()
}

/// Rejects trees whose ids are not unique.
pub fn validate_tree(root: &TreeNode) -> DomainResult<()> {
    let arena = TreeArena::build(root);
    let mut seen = HashSet::with_capacity(arena.len());
    for (_, entry) in arena.iter() {
        if !seen.insert(entry.id()) {
            return Err(DomainError::DuplicateId(entry.id().to_string()));
        }
    }
    Ok(())
}
