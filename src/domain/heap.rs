//! Level-order max-heap conversion.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::node::TreeNode;

/// Node values in level order, absent values as zero.
pub fn level_order_values(root: &TreeNode) -> Vec<f64> {
    TreeArena::build(root)
        .iter_level_order()
        .map(|(_, node)| node.node.numeric_value())
        .collect()
}

fn sift_down(values: &mut [f64], mut i: usize) {
    let n = values.len();
    loop {
        let left = 2 * i + 1;
        let right = 2 * i + 2;
        let mut largest = i;

        if left < n && values[left] > values[largest] {
            largest = left;
        }
        if right < n && values[right] > values[largest] {
            largest = right;
        }
        if largest == i {
            return;
        }
        values.swap(i, largest);
        i = largest;
    }
}

/// Bottom-up heap construction in place.
pub fn heapify(values: &mut [f64]) {
    for i in (0..values.len() / 2).rev() {
        sift_down(values, i);
    }
}

/// Every parent at `i` is at least as large as its children at `2i + 1` and `2i + 2`.
pub fn is_max_heap(values: &[f64]) -> bool {
    (0..values.len()).all(|i| {
        [2 * i + 1, 2 * i + 2]
            .iter()
            .filter(|&&child| child < values.len())
            .all(|&child| values[i] >= values[child])
    })
}

/// Builds the complete binary tree whose level-order values are `values`.
///
/// Index `i` becomes node `heap-{i}` labelled `Node {i}`. Nodes are assembled
/// from the last index backwards so every child exists before its parent.
fn build_heap_tree(values: &[f64]) -> Option<TreeNode> {
    let mut slots: Vec<Option<TreeNode>> = Vec::with_capacity(values.len());
    slots.resize_with(values.len(), || None);

    for i in (0..values.len()).rev() {
        let children: Vec<Arc<TreeNode>> = [2 * i + 1, 2 * i + 2]
            .iter()
            .filter_map(|&child| slots.get_mut(child).and_then(Option::take))
            .map(Arc::new)
            .collect();

        slots[i] = Some(TreeNode {
            id: format!("heap-{i}"),
            label: format!("Node {i}"),
            value: Some(values[i]),
            children: if children.is_empty() { None } else { Some(children) },
        });
    }

    slots.into_iter().next().flatten()
}

/// Returns a new tree holding the original values arranged as a max heap.
///
/// Original ids, labels and shape are discarded; only the value multiset
/// survives.
#[instrument(level = "debug", skip(root), fields(root = %root.id))]
pub fn convert_to_max_heap(root: &TreeNode) -> TreeNode {
    let mut values = level_order_values(root);
    heapify(&mut values);
    debug!(nodes = values.len(), top = values.first().copied(), "heapified");

    // A tree always has at least its root, so the rebuilt heap is never empty
    build_heap_tree(&values).unwrap_or_else(|| TreeNode::leaf("heap-0", "Node 0", Some(0.0)))
}
