//! Domain layer: tree model and algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every algorithm takes a tree by reference and returns a derived value.

pub mod arena;
pub mod balance;
pub mod edit;
pub mod error;
pub mod heap;
pub mod node;
pub mod path;
pub mod render;
pub mod search;
pub mod traversal;

pub use arena::{ArenaNode, TreeArena};
pub use balance::{analyze_balance, check_balance, subtree_height, BalanceReport};
pub use edit::{add_child, next_node_id, update_node_value};
pub use error::{DomainError, DomainResult};
pub use heap::{convert_to_max_heap, heapify, is_max_heap, level_order_values};
pub use node::TreeNode;
pub use path::{find_shortest_path, lowest_common_ancestor};
pub use render::TreeNodeConvert;
pub use search::{find_node, search_nodes, validate_tree};
pub use traversal::{bfs_traversal, dfs_traversal, traverse, Traversal, TraversalKind};
