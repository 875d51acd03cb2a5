// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource enumeration contract consumed by the manifest store.

use std::io::Read;

use crate::error::TrellisError;
use crate::types::LoadingContext;

/// A single readable manifest resource.
pub struct Resource {
    /// Where the resource came from (file path, embedded name), for diagnostics.
    pub origin: String,
    /// The resource bytes.
    pub reader: Box<dyn Read + Send>,
}

impl Resource {
    pub fn new(origin: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self {
            origin: origin.into(),
            reader: Box::new(reader),
        }
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Maps a location to the resources visible from a loading context.
///
/// Implementations return resources in a stable discovery order, and an
/// empty list (not an error) when nothing exists at the location. Failures of
/// the underlying mechanism are reported as
/// [`TrellisError::ResourceEnumeration`].
pub trait ResourceEnumerator: Send + Sync {
    fn enumerate(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<Resource>, TrellisError>;
}
