//! Service container for dependency injection
//!
//! Wires up the tree source with its dependencies.

use std::sync::Arc;

use crate::config::Settings;
use crate::infrastructure::source::{JsonFileSource, SampleTreeSource, TreeSource};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and I/O implementations.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// File-backed source for the configured tree file, if any.
    pub fn json_source(&self) -> Option<JsonFileSource> {
        self.settings
            .tree_file
            .as_ref()
            .map(|path| JsonFileSource::new(Arc::clone(&self.fs), path.clone()))
    }

    /// The configured tree file, or the built-in sample tree.
    pub fn tree_source(&self) -> Box<dyn TreeSource> {
        match self.json_source() {
            Some(source) => Box::new(source),
            None => Box::new(SampleTreeSource),
        }
    }
}
