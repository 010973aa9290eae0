//! Copy-on-write edits: value updates and child insertion.

use std::sync::Arc;

use rstest::rstest;

use rstree::domain::{add_child, find_node, next_node_id, update_node_value, DomainError, TreeNode};
use rstree::util::testing;

// ============================================================
// update_node_value
// ============================================================

#[test]
fn given_sample_tree_when_updating_leaf_then_new_tree_has_value_and_old_unchanged() {
    testing::init_test_setup();
    let old = testing::sample_tree();

    let new = update_node_value(&old, "10", 99.5).unwrap();

    assert_eq!(find_node(&new, "10").unwrap().value, Some(99.5));
    assert_eq!(find_node(&old, "10").unwrap().value, Some(55.0));
    // Left subtree of the root is off the edited path
    assert!(Arc::ptr_eq(&old.children()[0], &new.children()[0]));
    assert!(Arc::ptr_eq(
        &old.children()[1].children()[1],
        &new.children()[1].children()[1]
    ));
}

#[test]
fn given_unknown_id_when_updating_then_node_not_found() {
    let result = update_node_value(&testing::sample_tree(), "42", 1.0);
    assert_eq!(result, Err(DomainError::NodeNotFound("42".to_string())));
}

// ============================================================
// add_child
// ============================================================

#[test]
fn given_sample_tree_when_adding_child_then_id_is_max_plus_one() {
    let old = testing::sample_tree();

    let (new, id) = add_child(&old, "5", Some(7.0)).unwrap();

    assert_eq!(id, "13");
    let parent = find_node(&new, "5").unwrap();
    assert_eq!(parent.children().len(), 1);
    let child = &parent.children()[0];
    assert_eq!(child.label, "N13");
    assert_eq!(child.value, Some(7.0));
    assert!(child.is_leaf());
    assert!(find_node(&old, "13").is_none());
    assert_eq!(new.node_count(), 13);
}

#[test]
fn given_parent_with_children_when_adding_child_then_appended_last() {
    let (new, id) = add_child(&testing::sample_tree(), "7", None).unwrap();
    let ids: Vec<_> = find_node(&new, "7")
        .unwrap()
        .children()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(ids, vec!["11".to_string(), "12".to_string(), id]);
}

#[test]
fn given_unknown_parent_when_adding_child_then_node_not_found() {
    let result = add_child(&testing::sample_tree(), "missing", None);
    assert!(matches!(result, Err(DomainError::NodeNotFound(id)) if id == "missing"));
}

#[rstest]
#[case(&["a", "b"], "1")]
#[case(&["3", "x", "10"], "11")]
#[case(&["1", "2"], "3")]
fn given_ids_when_computing_next_id_then_one_above_numeric_max(
    #[case] ids: &[&str],
    #[case] expected: &str,
) {
    let children: Vec<TreeNode> = ids[1..].iter().map(|id| TreeNode::leaf(*id, *id, None)).collect();
    let tree = TreeNode::with_children(ids[0], ids[0], None, children);
    assert_eq!(next_node_id(&tree), expected);
}

#[test]
fn given_repeated_adds_when_adding_children_then_ids_stay_unique() {
    let mut tree = testing::sample_tree();
    let mut added = Vec::new();
    for _ in 0..3 {
        let (next, id) = add_child(&tree, "1", None).unwrap();
        tree = next;
        added.push(id);
    }
    assert_eq!(added, vec!["13", "14", "15"]);
    assert!(rstree::domain::validate_tree(&tree).is_ok());
}
