//! Height-balance diagnosis.

use std::collections::BTreeSet;

use rstest::rstest;

use rstree::domain::{analyze_balance, check_balance, subtree_height, TreeNode};
use rstree::util::testing;

// ============================================================
// Sample tree
// ============================================================

#[rstest]
#[case("8", 1)]
#[case("5", 1)]
#[case("4", 2)]
#[case("6", 2)]
#[case("7", 2)]
#[case("2", 3)]
#[case("3", 3)]
#[case("1", 4)]
fn given_sample_tree_when_analyzing_then_heights_match(#[case] id: &str, #[case] height: usize) {
    testing::init_test_setup();
    let report = analyze_balance(&testing::sample_tree());
    assert_eq!(report.height(id), Some(height));
}

#[test]
fn given_sample_tree_when_checking_balance_then_no_node_flagged() {
    // Node 2 has children of heights 2 and 1, node 3 has 2 and 2
    let unbalanced = check_balance(&testing::sample_tree());
    assert!(unbalanced.is_empty());
}

// ============================================================
// Unbalanced shapes
// ============================================================

//        r
//      / | \
//     a  b  c
//     |
//     d
//     |
//     e
//     |
//     f
fn lopsided() -> TreeNode {
    let deep = TreeNode::with_children(
        "a",
        "a",
        None,
        vec![TreeNode::with_children(
            "d",
            "d",
            None,
            vec![TreeNode::with_children("e", "e", None, vec![TreeNode::leaf("f", "f", None)])],
        )],
    );
    TreeNode::with_children(
        "r",
        "r",
        None,
        vec![deep, TreeNode::leaf("b", "b", None), TreeNode::leaf("c", "c", None)],
    )
}

#[test]
fn given_lopsided_tree_when_checking_balance_then_only_root_flagged() {
    let report = analyze_balance(&lopsided());
    assert_eq!(report.unbalanced, BTreeSet::from(["r".to_string()]));
    assert!(!report.is_balanced());
    assert_eq!(report.height("r"), Some(5));
}

#[test]
fn given_lopsided_tree_when_measuring_then_height_counts_levels() {
    assert_eq!(subtree_height(&lopsided()), 5);
    assert_eq!(subtree_height(&TreeNode::leaf("x", "x", None)), 1);
}

#[test]
fn given_height_difference_of_one_when_checking_then_balanced() {
    let tree = TreeNode::with_children(
        "r",
        "r",
        None,
        vec![
            TreeNode::with_children("a", "a", None, vec![TreeNode::leaf("c", "c", None)]),
            TreeNode::leaf("b", "b", None),
        ],
    );
    assert!(check_balance(&tree).is_empty());
}

#[test]
fn given_deep_chain_when_analyzing_then_completes_with_full_height() {
    let chain = testing::chain_tree(50_000);
    let report = analyze_balance(&chain);
    assert!(report.is_balanced());
    assert_eq!(report.height("0"), Some(50_000));
}
