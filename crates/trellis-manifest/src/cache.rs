// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared cache of merged manifests, partitioned by loading context and location.

use std::sync::Arc;

use dashmap::DashMap;
use trellis_core::LoadingContext;

use crate::manifest::Manifest;

/// Cache partition key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub context: LoadingContext,
    pub location: String,
}

impl CacheKey {
    pub fn new(context: &LoadingContext, location: &str) -> Self {
        Self {
            context: context.clone(),
            location: location.to_string(),
        }
    }
}

/// Merged manifests keyed by `(context, location)`.
///
/// Only complete manifests are ever stored. Racing loaders may each build a
/// manifest; the first insert wins and every caller gets that value back.
#[derive(Debug, Default)]
pub struct ManifestCache {
    entries: DashMap<CacheKey, Arc<Manifest>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, context: &LoadingContext, location: &str) -> Option<Arc<Manifest>> {
        self.entries
            .get(&CacheKey::new(context, location))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Store `manifest` unless an entry already exists; returns the stored value.
    pub fn insert_if_absent(
        &self,
        context: &LoadingContext,
        location: &str,
        manifest: Manifest,
    ) -> Arc<Manifest> {
        let entry = self
            .entries
            .entry(CacheKey::new(context, location))
            .or_insert_with(|| Arc::new(manifest));
        Arc::clone(entry.value())
    }

    pub fn contains(&self, context: &LoadingContext, location: &str) -> bool {
        self.entries.contains_key(&CacheKey::new(context, location))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached manifest. The load path never calls this.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let cache = ManifestCache::new();
        let ctx = LoadingContext::system();

        let first: Manifest = [("svc.A", vec!["one"])].into_iter().collect();
        let second: Manifest = [("svc.A", vec!["two"])].into_iter().collect();

        let stored = cache.insert_if_absent(&ctx, "loc", first);
        let again = cache.insert_if_absent(&ctx, "loc", second);

        assert!(Arc::ptr_eq(&stored, &again));
        assert_eq!(again.lookup("svc.A"), ["one"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn partitions_by_context_and_location() {
        let cache = ManifestCache::new();
        let a = LoadingContext::new("a");
        let b = LoadingContext::new("b");

        cache.insert_if_absent(&a, "loc", Manifest::new());
        assert!(cache.contains(&a, "loc"));
        assert!(!cache.contains(&b, "loc"));
        assert!(!cache.contains(&a, "other"));
        assert!(cache.get(&b, "loc").is_none());

        cache.insert_if_absent(&b, "loc", Manifest::new());
        cache.insert_if_absent(&a, "other", Manifest::new());
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_inserts_converge() {
        let cache = Arc::new(ManifestCache::new());
        let ctx = LoadingContext::system();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    let manifest: Manifest =
                        [("svc.A", vec![format!("impl-{i}")])].into_iter().collect();
                    cache.insert_if_absent(&ctx, "loc", manifest)
                })
            })
            .collect();

        let results: Vec<Arc<Manifest>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for result in &results {
            assert!(Arc::ptr_eq(result, &results[0]));
            assert_eq!(result.lookup("svc.A").len(), 1);
        }
        assert_eq!(cache.len(), 1);
    }
}
