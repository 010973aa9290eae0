//! Shortest paths and lowest common ancestors.

use rstest::{fixture, rstest};

use rstree::domain::{find_shortest_path, lowest_common_ancestor, TreeArena, TreeNode};
use rstree::util::testing;

#[fixture]
fn sample() -> TreeNode {
    testing::init_test_setup();
    testing::sample_tree()
}

fn depth_of(root: &TreeNode, id: &str) -> usize {
    let arena = TreeArena::build(root);
    arena
        .index_of(id)
        .and_then(|idx| arena.get_node(idx))
        .map(|node| node.depth)
        .unwrap()
}

// ============================================================
// Paths
// ============================================================

#[rstest]
#[case("8", "5", &["8", "4", "2", "5"])]
#[case("8", "12", &["8", "4", "2", "1", "3", "7", "12"])]
#[case("1", "10", &["1", "3", "6", "10"])]
#[case("10", "1", &["10", "6", "3", "1"])]
#[case("9", "9", &["9"])]
fn given_two_nodes_when_finding_path_then_passes_through_lca(
    sample: TreeNode,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: &[&str],
) {
    assert_eq!(find_shortest_path(&sample, start, end), expected);
}

#[rstest]
fn given_reversed_endpoints_when_finding_path_then_path_reversed(sample: TreeNode) {
    let forward = find_shortest_path(&sample, "9", "11");
    let mut backward = find_shortest_path(&sample, "11", "9");
    backward.reverse();
    assert_eq!(forward, backward);
}

#[rstest]
#[case("8", "5")]
#[case("12", "9")]
#[case("3", "11")]
fn given_two_nodes_when_finding_path_then_length_follows_depths(
    sample: TreeNode,
    #[case] start: &str,
    #[case] end: &str,
) {
    let path = find_shortest_path(&sample, start, end);
    let lca = lowest_common_ancestor(&sample, start, end).unwrap();
    let expected =
        depth_of(&sample, start) + depth_of(&sample, end) - 2 * depth_of(&sample, &lca) + 1;
    assert_eq!(path.len(), expected);
}

#[rstest]
#[case("8", "99")]
#[case("99", "8")]
#[case("99", "99")]
fn given_unknown_id_when_finding_path_then_empty(
    sample: TreeNode,
    #[case] start: &str,
    #[case] end: &str,
) {
    assert!(find_shortest_path(&sample, start, end).is_empty());
}

// ============================================================
// Lowest common ancestor
// ============================================================

#[rstest]
#[case("8", "5", Some("2"))]
#[case("8", "4", Some("4"))]
#[case("10", "12", Some("3"))]
#[case("8", "11", Some("1"))]
#[case("8", "nope", None)]
fn given_two_nodes_when_finding_lca_then_deepest_shared_ancestor(
    sample: TreeNode,
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(lowest_common_ancestor(&sample, a, b).as_deref(), expected);
}
