use std::collections::{HashMap, VecDeque};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::node::TreeNode;

/// Entry of the arena: a borrowed tree node plus its structural links.
#[derive(Debug)]
pub struct ArenaNode<'t> {
    /// The node in the source tree
    pub node: &'t TreeNode,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in child order
    pub children: Vec<Index>,
    /// Distance from the root (root has depth 0)
    pub depth: usize,
    /// Position among the parent's children
    pub position: usize,
}

impl ArenaNode<'_> {
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

/// Flat, index-based view over a borrowed tree.
///
/// Built once per algorithm call with an explicit stack, it gives O(1) parent
/// and id lookups and stack/queue based iterators, so no algorithm has to
/// recurse over the (possibly deep) recursive node structure.
#[derive(Debug)]
pub struct TreeArena<'t> {
    arena: Arena<ArenaNode<'t>>,
    root: Option<Index>,
    by_id: HashMap<&'t str, Index>,
}

impl<'t> TreeArena<'t> {
    #[instrument(level = "trace", skip(root), fields(root = %root.id))]
    pub fn build(root: &'t TreeNode) -> Self {
        let mut tree = Self {
            arena: Arena::new(),
            root: None,
            by_id: HashMap::new(),
        };
        let mut stack: Vec<(&'t TreeNode, Option<Index>, usize)> = vec![(root, None, 0)];

        while let Some((node, parent, position)) = stack.pop() {
            let idx = tree.insert_node(node, parent, position);
            // Reverse push keeps left-to-right insertion into the parent's child list
            for (pos, child) in node.children().iter().enumerate().rev() {
                stack.push((child.as_ref(), Some(idx), pos));
            }
        }

        tree
    }

    fn insert_node(&mut self, node: &'t TreeNode, parent: Option<Index>, position: usize) -> Index {
        let depth = parent
            .and_then(|p| self.arena.get(p))
            .map(|p| p.depth + 1)
            .unwrap_or(0);
        let node_idx = self.arena.insert(ArenaNode {
            node,
            parent,
            children: Vec::new(),
            depth,
            position,
        });

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }
        // First occurrence wins; trees handed to the core have unique ids
        self.by_id.entry(node.id.as_str()).or_insert(node_idx);

        node_idx
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode<'t>> {
        self.arena.get(idx)
    }

    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder: node first, then children left to right.
    pub fn iter(&self) -> PreOrderIterator<'_, 't> {
        PreOrderIterator::new(self)
    }

    /// Level order: all nodes at depth d before any node at depth d + 1.
    pub fn iter_level_order(&self) -> LevelOrderIterator<'_, 't> {
        LevelOrderIterator::new(self)
    }

    /// Post-order: children before their parent.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, 't> {
        PostOrderIterator::new(self)
    }

    /// Walks parent links from `idx` up to the root, both inclusive.
    pub fn path_to_root(&self, idx: Index) -> PathToRoot<'_, 't> {
        PathToRoot {
            arena: self,
            current: self.arena.get(idx).map(|_| idx),
        }
    }

    /// Number of levels in the tree, 0 for an empty arena.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter()
            .map(|(_, node)| node.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Ids of all leaf nodes in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.id().to_string())
            .collect()
    }
}

pub struct PreOrderIterator<'a, 't> {
    arena: &'a TreeArena<'t>,
    stack: Vec<Index>,
}

impl<'a, 't> PreOrderIterator<'a, 't> {
    fn new(arena: &'a TreeArena<'t>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a, 't> Iterator for PreOrderIterator<'a, 't> {
    type Item = (Index, &'a ArenaNode<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct LevelOrderIterator<'a, 't> {
    arena: &'a TreeArena<'t>,
    queue: VecDeque<Index>,
}

impl<'a, 't> LevelOrderIterator<'a, 't> {
    fn new(arena: &'a TreeArena<'t>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = arena.root() {
            queue.push_back(root);
        }
        Self { arena, queue }
    }
}

impl<'a, 't> Iterator for LevelOrderIterator<'a, 't> {
    type Item = (Index, &'a ArenaNode<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.arena.get_node(current_idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, 't> {
    arena: &'a TreeArena<'t>,
    stack: Vec<(Index, bool)>,
}

impl<'a, 't> PostOrderIterator<'a, 't> {
    fn new(arena: &'a TreeArena<'t>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a, 't> Iterator for PostOrderIterator<'a, 't> {
    type Item = (Index, &'a ArenaNode<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

pub struct PathToRoot<'a, 't> {
    arena: &'a TreeArena<'t>,
    current: Option<Index>,
}

impl<'a, 't> Iterator for PathToRoot<'a, 't> {
    type Item = (Index, &'a ArenaNode<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.arena.get_node(idx)?;
        self.current = node.parent;
        Some((idx, node))
    }
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

    fn ids<'a, 't: 'a>(iter: impl Iterator<Item = (Index, &'a ArenaNode<'t>)>) -> Vec<String> {
        iter.map(|(_, n)| n.id().to_string()).collect()
    }

    #[test]
    fn given_tree_when_building_arena_then_links_and_depths_are_set() {
        let tree = small_tree();
        let arena = TreeArena::build(&tree);

        assert_eq!(arena.len(), 5);
        let d = arena.get_node(arena.index_of("d").unwrap()).unwrap();
        assert_eq!(d.depth, 2);
        assert_eq!(d.position, 1);
        assert_eq!(d.parent, arena.index_of("a"));
        assert_eq!(arena.get_node(arena.root().unwrap()).unwrap().id(), "r");
    }

    #[test]
    fn given_tree_when_iterating_then_orders_match() {
        let tree = small_tree();
        let arena = TreeArena::build(&tree);

        assert_eq!(ids(arena.iter()), vec!["r", "a", "c", "d", "b"]);
        assert_eq!(ids(arena.iter_level_order()), vec!["r", "a", "b", "c", "d"]);
        assert_eq!(ids(arena.iter_postorder()), vec!["c", "d", "a", "b", "r"]);
    }

    #[test]
    fn given_node_when_walking_to_root_then_includes_both_ends() {
        let tree = small_tree();
        let arena = TreeArena::build(&tree);
        let c = arena.index_of("c").unwrap();

        assert_eq!(ids(arena.path_to_root(c)), vec!["c", "a", "r"]);
    }

    #[test]
    fn given_tree_when_collecting_depth_and_leaves_then_correct() {
        let tree = small_tree();
        let arena = TreeArena::build(&tree);

        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.leaf_nodes(), vec!["c", "d", "b"]);
    }
}
