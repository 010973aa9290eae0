use std::env;
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::TreeNode;
use crate::infrastructure::SampleTreeSource;

static TEST_SETUP: Once = Once::new();

/// Installs the test log subscriber once per test binary (`RUST_LOG`, default `debug`).
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if !tracing::dispatcher::has_been_set() {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// The 12-node demo tree used across tests.
pub fn sample_tree() -> TreeNode {
    SampleTreeSource::tree()
}

/// Chain of `len` (>= 1) nodes with ids `0..len`, each the only child of the previous one.
pub fn chain_tree(len: usize) -> TreeNode {
    let mut node = TreeNode::leaf((len - 1).to_string(), format!("n{}", len - 1), Some(0.0));
    for i in (0..len - 1).rev() {
        node = TreeNode::with_children(i.to_string(), format!("n{i}"), Some(i as f64), vec![node]);
    }
    node
}

/// Preorder ids of a tree.
pub fn preorder_ids(root: &TreeNode) -> Vec<String> {
    crate::domain::dfs_traversal(root).order
}
