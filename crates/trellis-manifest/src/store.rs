// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loads, merges and caches manifests for a loading context.

use std::io::Read;
use std::sync::Arc;

use tracing::debug;
use trellis_core::{LoadingContext, Resource, ResourceEnumerator, TrellisError};

use crate::cache::ManifestCache;
use crate::manifest::Manifest;
use crate::parser::parse_manifest;

/// Resolves a location to its merged [`Manifest`] through a shared cache.
#[derive(Clone)]
pub struct ManifestStore {
    enumerator: Arc<dyn ResourceEnumerator>,
    cache: Arc<ManifestCache>,
}

impl ManifestStore {
    pub fn new(enumerator: Arc<dyn ResourceEnumerator>, cache: Arc<ManifestCache>) -> Self {
        Self { enumerator, cache }
    }

    pub fn cache(&self) -> &Arc<ManifestCache> {
        &self.cache
    }

    /// Load the manifest at `location` as seen from `context`.
    ///
    /// Cached manifests are returned without touching the enumerator. On a
    /// miss every resource at the location is parsed and appended in
    /// discovery order. Nothing is cached when any resource fails.
    pub fn load(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Arc<Manifest>, TrellisError> {
        if location.trim().is_empty() {
            return Err(TrellisError::InvalidLocation(location.to_string()));
        }

        if let Some(cached) = self.cache.get(context, location) {
            return Ok(cached);
        }

        let resources = self.enumerator.enumerate(context, location)?;
        let count = resources.len();
        let mut merged = Manifest::new();
        for resource in resources {
            merged.merge(read_resource(location, resource)?);
        }

        debug!(
            context = %context,
            location,
            resources = count,
            keys = merged.len(),
            "manifest loaded"
        );
        Ok(self.cache.insert_if_absent(context, location, merged))
    }
}

impl std::fmt::Debug for ManifestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestStore")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

fn read_resource(location: &str, mut resource: Resource) -> Result<Manifest, TrellisError> {
    let load_error = |source: Box<dyn std::error::Error + Send + Sync>| {
        TrellisError::ManifestLoad {
            location: location.to_string(),
            resource: resource.origin.clone(),
            source,
        }
    };

    let mut bytes = Vec::new();
    if let Err(e) = resource.reader.read_to_end(&mut bytes) {
        return Err(load_error(Box::new(e)));
    }
    let text = String::from_utf8(bytes).map_err(|e| load_error(Box::new(e)))?;
    let entries = parse_manifest(&text).map_err(|e| load_error(Box::new(e)))?;
    Ok(entries.into_iter().collect())
}
