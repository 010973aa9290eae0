//! Tree data sources.
//!
//! A source hands out validated trees: ids are unique before any algorithm
//! sees them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{self, TreeNode};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

pub trait TreeSource: Send + Sync {
    /// Loads the whole tree.
    fn fetch_tree(&self) -> InfraResult<TreeNode>;

    /// Loads the subtree rooted at `id`, if present.
    fn fetch_node(&self, id: &str) -> InfraResult<Option<TreeNode>> {
        let tree = self.fetch_tree()?;
        Ok(domain::find_node(&tree, id).cloned())
    }

    /// Loads all nodes matching `query` (id, label or value), in preorder.
    fn search_nodes(&self, query: &str) -> InfraResult<Vec<TreeNode>> {
        let tree = self.fetch_tree()?;
        Ok(domain::search_nodes(&tree, query)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Built-in demo tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleTreeSource;

impl SampleTreeSource {
    //                 1 Root (50)
    //          /                  \
    //      2 A (30)               3 B (70)
    //      /     \              /         \
    //   4 C (20)  5 D (35)   6 E (60)    7 F (80)
    //   /    \                  |        /     \
    // 8 G   9 H              10 I      11 J   12 K
    // (10)  (25)             (55)      (75)   (85)
    pub fn tree() -> TreeNode {
        let leaf = |id: &str, label: &str, value: f64| TreeNode::leaf(id, label, Some(value));
        TreeNode::with_children(
            "1",
            "Root",
            Some(50.0),
            vec![
                TreeNode::with_children(
                    "2",
                    "A",
                    Some(30.0),
                    vec![
                        TreeNode::with_children(
                            "4",
                            "C",
                            Some(20.0),
                            vec![leaf("8", "G", 10.0), leaf("9", "H", 25.0)],
                        ),
                        leaf("5", "D", 35.0),
                    ],
                ),
                TreeNode::with_children(
                    "3",
                    "B",
                    Some(70.0),
                    vec![
                        TreeNode::with_children("6", "E", Some(60.0), vec![leaf("10", "I", 55.0)]),
                        TreeNode::with_children(
                            "7",
                            "F",
                            Some(80.0),
                            vec![leaf("11", "J", 75.0), leaf("12", "K", 85.0)],
                        ),
                    ],
                ),
            ],
        )
    }
}

impl TreeSource for SampleTreeSource {
    fn fetch_tree(&self) -> InfraResult<TreeNode> {
        Ok(Self::tree())
    }
}

/// Tree stored as a JSON document (`id`, `label`, optional `value`, optional `children`).
pub struct JsonFileSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `tree` back as pretty-printed JSON.
    #[instrument(level = "debug", skip(self, tree), fields(path = %self.path.display()))]
    pub fn store(&self, tree: &TreeNode) -> InfraResult<()> {
        domain::validate_tree(tree)?;
        let json = to_json(tree, &self.path)?;
        self.fs
            .ensure_parent(&self.path)
            .map_err(|e| InfraError::io(format!("create parent of {}", self.path.display()), e))?;
        self.fs
            .write(&self.path, &json)
            .map_err(|e| InfraError::io(format!("write {}", self.path.display()), e))
    }
}

impl TreeSource for JsonFileSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn fetch_tree(&self) -> InfraResult<TreeNode> {
        if !self.fs.exists(&self.path) {
            return Err(InfraError::io(
                format!("tree file not found: {}", self.path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?;
        let tree: TreeNode = serde_json::from_str(&content).map_err(|source| InfraError::Parse {
            path: self.path.clone(),
            source,
        })?;
        domain::validate_tree(&tree)?;
        debug!("loaded {} nodes", tree.node_count());
        Ok(tree)
    }
}

/// Pretty-printed JSON of `tree`.
pub fn to_json(tree: &TreeNode, path: &Path) -> InfraResult<String> {
    serde_json::to_string_pretty(tree).map_err(|source| InfraError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
