use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Node of a rooted tree.
///
/// Children are shared through `Arc` so that copy-on-write edits can reuse
/// every subtree that is not on the edited path. A node whose `children` is
/// `None` is a leaf; `Some(vec![])` is also treated as a leaf by the
/// algorithms but is preserved as-is through serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier within the tree
    pub id: String,
    /// Display label, not necessarily unique
    pub label: String,
    /// Optional numeric payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Ordered children, exclusively owned by this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Arc<TreeNode>>>,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            children: None,
        }
    }

    /// Creates a node owning `children`; an empty vector yields a leaf without a children list.
    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        value: Option<f64>,
        children: Vec<TreeNode>,
    ) -> Self {
        let children = if children.is_empty() {
            None
        } else {
            Some(children.into_iter().map(Arc::new).collect())
        };
        Self {
            id: id.into(),
            label: label.into(),
            value,
            children,
        }
    }

    /// Children in order; empty for leaves.
    pub fn children(&self) -> &[Arc<TreeNode>] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Value used by numeric algorithms: absent values count as zero.
    pub fn numeric_value(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children().iter().map(|c| c.as_ref()));
        }
        count
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} [{}] = {}", self.label, self.id, value),
            None => write!(f, "{} [{}]", self.label, self.id),
        }
    }
}

// Tear down uniquely owned descendants with an explicit stack so that
// dropping a degenerate (list-shaped) tree cannot overflow the call stack.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = match self.children.take() {
            Some(children) => children,
            None => return,
        };
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child) {
                if let Some(grandchildren) = node.children.take() {
                    pending.extend(grandchildren);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_children_when_constructing_then_node_is_leaf_without_list() {
        let node = TreeNode::with_children("1", "Root", Some(1.0), vec![]);
        assert!(node.is_leaf());
        assert!(node.children.is_none());
    }

    #[test]
    fn given_missing_value_when_reading_numeric_value_then_zero() {
        let node = TreeNode::leaf("1", "Root", None);
        assert_eq!(node.numeric_value(), 0.0);
    }

    #[test]
    fn given_leaf_when_serializing_then_children_field_is_omitted() {
        let node = TreeNode::leaf("8", "G", Some(10.0));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"id":"8","label":"G","value":10.0}"#);
    }

    #[test]
    fn given_json_without_value_when_deserializing_then_value_is_none() {
        let node: TreeNode =
            serde_json::from_str(r#"{"id":"1","label":"Root","children":[{"id":"2","label":"A"}]}"#)
                .unwrap();
        assert_eq!(node.value, None);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].id, "2");
    }

    #[test]
    fn given_deep_chain_when_dropping_then_does_not_overflow() {
        let mut node = TreeNode::leaf("0", "n0", None);
        for i in 1..200_000 {
            node = TreeNode::with_children(i.to_string(), format!("n{i}"), None, vec![node]);
        }
        assert_eq!(node.children().len(), 1);
        drop(node);
    }
}
