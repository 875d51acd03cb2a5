// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundled [`ResourceEnumerator`] implementations.
//!
//! - [`DirectoryEnumerator`] treats directories as a search path, the way a
//!   class path is searched for resources.
//! - [`EmbeddedEnumerator`] serves manifests compiled into the binary.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind};
use std::path::{Component, Path, PathBuf};

use tracing::trace;
use trellis_core::{LoadingContext, Resource, ResourceEnumerator, TrellisError};

/// Enumerates `root/location` across a list of directories.
///
/// Shared roots are searched first for every context, followed by the roots
/// registered for the requesting context.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEnumerator {
    shared: Vec<PathBuf>,
    contexts: HashMap<LoadingContext, Vec<PathBuf>>,
}

impl DirectoryEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root visible from every context.
    pub fn with_shared_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.shared.push(root.into());
        self
    }

    /// Add a root visible only from `context`.
    pub fn with_root(mut self, context: LoadingContext, root: impl Into<PathBuf>) -> Self {
        self.contexts.entry(context).or_default().push(root.into());
        self
    }

    /// Roots searched for `context`, in search order.
    pub fn roots(&self, context: &LoadingContext) -> impl Iterator<Item = &Path> {
        self.shared
            .iter()
            .chain(self.contexts.get(context).into_iter().flatten())
            .map(PathBuf::as_path)
    }
}

impl ResourceEnumerator for DirectoryEnumerator {
    fn enumerate(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<Resource>, TrellisError> {
        let relative = Path::new(location);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if location.is_empty() || escapes {
            return Err(TrellisError::InvalidLocation(location.to_string()));
        }

        let mut resources = Vec::new();
        for root in self.roots(context) {
            let path = root.join(relative);
            let enumeration_error = |e: std::io::Error| TrellisError::ResourceEnumeration {
                location: location.to_string(),
                source: Box::new(e),
            };
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    trace!(path = %path.display(), "not a file, skipped");
                    continue;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    trace!(path = %path.display(), "no manifest at root");
                    continue;
                }
                Err(e) => return Err(enumeration_error(e)),
            }
            let file = File::open(&path).map_err(enumeration_error)?;
            resources.push(Resource::new(
                path.display().to_string(),
                BufReader::new(file),
            ));
        }
        Ok(resources)
    }
}

/// Serves manifest bytes registered in memory, for example via `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedEnumerator {
    resources: HashMap<(LoadingContext, String), Vec<(String, Vec<u8>)>>,
}

impl EmbeddedEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one resource. Resources at the same location are served in
    /// registration order.
    pub fn with_resource(
        mut self,
        context: LoadingContext,
        location: impl Into<String>,
        origin: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.resources
            .entry((context, location.into()))
            .or_default()
            .push((origin.into(), content.into()));
        self
    }
}

impl ResourceEnumerator for EmbeddedEnumerator {
    fn enumerate(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<Resource>, TrellisError> {
        let key = (context.clone(), location.to_string());
        Ok(self
            .resources
            .get(&key)
            .into_iter()
            .flatten()
            .map(|(origin, bytes)| Resource::new(origin.clone(), Cursor::new(bytes.clone())))
            .collect())
    }
}
