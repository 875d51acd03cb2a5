// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end resolution tests.
//!
//! `TestHarness` writes manifests below a temporary root, wires a
//! [`DirectoryEnumerator`] behind a [`CountingEnumerator`], and builds a
//! [`FactoryRegistry`] over the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use trellis_core::{DEFAULT_FACTORIES_LOCATION, LoadingContext, TrellisError};
use trellis_factory::{FactoryRegistry, FactoryTable};
use trellis_manifest::{DirectoryEnumerator, ManifestCache, ManifestStore};

use crate::enumerators::CountingEnumerator;
use crate::fixtures::greeter_table;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    manifests: Vec<(String, String, String)>,
    table: Option<FactoryTable>,
    context: LoadingContext,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            manifests: Vec::new(),
            table: None,
            context: LoadingContext::system(),
        }
    }

    /// Add a manifest at the default location under a root named `root`.
    ///
    /// Roots are searched in the order they are first mentioned.
    pub fn with_manifest(self, root: &str, content: &str) -> Self {
        self.with_manifest_at(root, DEFAULT_FACTORIES_LOCATION, content)
    }

    /// Add a manifest at `location` under a root named `root`.
    pub fn with_manifest_at(mut self, root: &str, location: &str, content: &str) -> Self {
        self.manifests
            .push((root.to_string(), location.to_string(), content.to_string()));
        self
    }

    /// Use `table` instead of [`greeter_table`].
    pub fn with_table(mut self, table: FactoryTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Resolve from `context` instead of the system context.
    pub fn with_context(mut self, context: LoadingContext) -> Self {
        self.context = context;
        self
    }

    /// Write the manifests and build the registry.
    pub fn build(self) -> Result<TestHarness, TrellisError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| TrellisError::Internal(format!("cannot create temp dir: {e}")))?;

        let mut roots: Vec<PathBuf> = Vec::new();
        for (root, location, content) in &self.manifests {
            let root_path = temp_dir.path().join(root);
            if !roots.contains(&root_path) {
                roots.push(root_path.clone());
            }
            write_file(&root_path.join(location), content)?;
        }

        let enumerator = roots
            .iter()
            .fold(DirectoryEnumerator::new(), |e, root| e.with_shared_root(root));
        let enumerator = Arc::new(CountingEnumerator::new(Arc::new(enumerator)));
        let store = ManifestStore::new(enumerator.clone(), Arc::new(ManifestCache::new()));
        let table = Arc::new(self.table.unwrap_or_else(greeter_table));
        let registry = FactoryRegistry::new(store, table).with_context(self.context);

        debug!(roots = roots.len(), "test harness built");
        Ok(TestHarness {
            registry,
            enumerator,
            roots,
            _temp_dir: temp_dir,
        })
    }
}

/// A registry over manifests written to a temporary directory.
pub struct TestHarness {
    /// Registry resolving from the harness roots.
    pub registry: FactoryRegistry,
    /// Enumerator behind the registry, for counting manifest reads.
    pub enumerator: Arc<CountingEnumerator>,
    roots: Vec<PathBuf>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Root directories in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), TrellisError> {
    let io_error =
        |e: std::io::Error| TrellisError::Internal(format!("cannot write {}: {e}", path.display()));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, content).map_err(io_error)
}
