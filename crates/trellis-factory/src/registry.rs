// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered resolution of capability implementations.
//!
//! [`FactoryRegistry`] combines a [`ManifestStore`] with a [`FactoryTable`]:
//! the manifest names the implementations of a capability, the table knows
//! how to construct them. Every resolve call is all-or-nothing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, trace};
use trellis_config::FactoriesConfig;
use trellis_config::validation::check_location;
use trellis_core::{
    Capability, DEFAULT_FACTORIES_LOCATION, LOWEST_PRECEDENCE, LoadingContext, TrellisError,
};
use trellis_manifest::{DirectoryEnumerator, ManifestCache, ManifestStore};

use crate::signature::{Args, Signature};
use crate::table::FactoryTable;

/// Discovers, instantiates, and orders implementations of a capability.
///
/// Cloning is cheap; clones share the manifest cache and registration table.
#[derive(Debug, Clone)]
pub struct FactoryRegistry {
    store: ManifestStore,
    table: Arc<FactoryTable>,
    context: LoadingContext,
    default_location: String,
}

impl FactoryRegistry {
    /// A registry resolving from the system context at the default location.
    pub fn new(store: ManifestStore, table: Arc<FactoryTable>) -> Self {
        Self {
            store,
            table,
            context: LoadingContext::system(),
            default_location: DEFAULT_FACTORIES_LOCATION.to_string(),
        }
    }

    /// Build a registry over filesystem roots described by `config`.
    ///
    /// The registry gets its own empty manifest cache.
    pub fn from_config(
        config: &FactoriesConfig,
        table: Arc<FactoryTable>,
    ) -> Result<Self, TrellisError> {
        if let Some(reason) = check_location(&config.default_location) {
            return Err(TrellisError::Config(format!(
                "factories.default_location {reason}"
            )));
        }

        let mut enumerator = DirectoryEnumerator::new();
        for root in &config.roots {
            enumerator = enumerator.with_shared_root(root);
        }
        for (name, context) in &config.contexts {
            for root in &context.roots {
                enumerator = enumerator.with_root(LoadingContext::new(name.clone()), root);
            }
        }

        info!(
            roots = config.roots.len(),
            contexts = config.contexts.len(),
            location = %config.default_location,
            "factory registry configured"
        );

        let store = ManifestStore::new(Arc::new(enumerator), Arc::new(ManifestCache::new()));
        Ok(Self::new(store, table)
            .with_context(config.loading_context())
            .with_default_location(config.default_location.clone()))
    }

    /// A view of this registry resolving from `context`.
    pub fn with_context(mut self, context: LoadingContext) -> Self {
        self.context = context;
        self
    }

    /// A view of this registry reading manifests from `location` by default.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn context(&self) -> &LoadingContext {
        &self.context
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    pub fn table(&self) -> &Arc<FactoryTable> {
        &self.table
    }

    /// Instantiate every implementation of `C` with its no-arg constructor.
    pub fn resolve<C: Capability + ?Sized>(&self) -> Result<Vec<Box<C>>, TrellisError> {
        self.resolve_with::<C>(&Signature::empty(), &Args::new())
    }

    /// Instantiate every implementation of `C` with the constructor selected
    /// by `signature`.
    pub fn resolve_with<C: Capability + ?Sized>(
        &self,
        signature: &Signature,
        args: &Args,
    ) -> Result<Vec<Box<C>>, TrellisError> {
        self.resolve_in::<C>(&self.context, signature, &self.default_location, args)
    }

    /// Like [`resolve_with`](Self::resolve_with), reading the manifest at `location`.
    pub fn resolve_at<C: Capability + ?Sized>(
        &self,
        signature: &Signature,
        location: &str,
        args: &Args,
    ) -> Result<Vec<Box<C>>, TrellisError> {
        self.resolve_in::<C>(&self.context, signature, location, args)
    }

    /// Load the manifest at `location` in `context`, instantiate every
    /// implementation it lists for `C`, and return them sorted by order.
    ///
    /// Instances are ordered by [`Capability::instance_order`], then the
    /// order declared at registration, then [`LOWEST_PRECEDENCE`]. The sort
    /// is stable so equal orders keep manifest order. The first failure
    /// aborts the call.
    pub fn resolve_in<C: Capability + ?Sized>(
        &self,
        context: &LoadingContext,
        signature: &Signature,
        location: &str,
        args: &Args,
    ) -> Result<Vec<Box<C>>, TrellisError> {
        let manifest = self.store.load(context, location)?;
        let identifiers = unique(manifest.lookup(C::NAME));

        let mut instances = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let descriptor = self.table.describe::<C>(identifier, signature)?;
            let instance = descriptor.instantiate(args).map_err(|failure| {
                TrellisError::FactoryInstantiation {
                    capability: C::NAME.to_string(),
                    identifier: identifier.to_string(),
                    source: Box::new(failure),
                }
            })?;
            let order = C::instance_order(&*instance)
                .or(descriptor.order())
                .unwrap_or(LOWEST_PRECEDENCE);
            trace!(capability = C::NAME, identifier, order, "factory instantiated");
            instances.push((order, instance));
        }

        instances.sort_by_key(|(order, _)| *order);
        debug!(
            capability = C::NAME,
            context = %context,
            location,
            count = instances.len(),
            "factories resolved"
        );
        Ok(instances.into_iter().map(|(_, instance)| instance).collect())
    }

    /// Identifiers listed for `C` at `location`, deduplicated, without
    /// instantiating anything.
    pub fn factory_names<C: Capability + ?Sized>(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<String>, TrellisError> {
        let manifest = self.store.load(context, location)?;
        Ok(unique(manifest.lookup(C::NAME))
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

/// Drop repeated identifiers, keeping the first occurrence.
fn unique(identifiers: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    identifiers
        .iter()
        .map(String::as_str)
        .filter(|identifier| seen.insert(*identifier))
        .collect()
}
