/*
termtree conversion of a tree value.

The recursive structure of `termtree::Tree` mirrors `TreeNode`; annotated
rendering with view state lives in the application layer. Conversion recurses
once per level; trees read from JSON nest at most 128 levels (serde_json
recursion limit).
 */
use termtree::Tree;

use crate::domain::node::TreeNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children().iter().map(|c| c.to_tree_string()).collect();
        Tree::new(self.to_string()).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_when_rendering_then_lines_follow_preorder() {
        let tree = TreeNode::with_children(
            "1",
            "Root",
            Some(50.0),
            vec![TreeNode::leaf("2", "A", None), TreeNode::leaf("3", "B", Some(7.5))],
        );
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Root [1] = 50");
        assert!(lines[1].ends_with("A [2]"));
        assert!(lines[2].ends_with("B [3] = 7.5"));
    }
}
