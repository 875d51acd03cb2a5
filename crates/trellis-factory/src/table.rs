// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration table mapping implementation identifiers to constructors.
//!
//! The table stores, per identifier, one entry for every capability the
//! implementation provides. Each entry carries the declared order and one
//! constructor per [`Signature`]. Constructors are stored type-erased and
//! recovered by capability at resolution time.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use trellis_core::{BoxError, Capability, TrellisError};

use crate::error::FactoryFailure;
use crate::signature::{Args, Signature};

/// A constructor producing instances of capability `C`.
pub type Constructor<C> = dyn Fn(&Args) -> Result<Box<C>, BoxError> + Send + Sync;

struct ConstructorEntry {
    signature: Signature,
    /// Holds an `Arc<Constructor<C>>` for the entry's capability.
    constructor: Box<dyn Any + Send + Sync>,
}

struct ImplementationEntry {
    capability: TypeId,
    capability_name: &'static str,
    order: Option<i32>,
    constructors: Vec<ConstructorEntry>,
}

/// Registered implementation as reported by [`FactoryTable::list_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryInfo {
    pub identifier: String,
    pub capability: &'static str,
    pub order: Option<i32>,
    pub signatures: Vec<Signature>,
}

/// Identifier → constructors for every registered implementation.
///
/// ```
/// use trellis_core::Capability;
/// use trellis_factory::FactoryTable;
///
/// pub trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// impl Capability for dyn Greeter {
///     const NAME: &'static str = "svc.Greeter";
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let mut table = FactoryTable::new();
/// table
///     .register::<dyn Greeter>("pkg.EnglishGreeter")
///     .order(10)
///     .no_arg(|| Box::new(English));
/// assert!(table.contains("pkg.EnglishGreeter"));
/// ```
#[derive(Default)]
pub struct FactoryTable {
    entries: HashMap<String, Vec<ImplementationEntry>>,
}

impl FactoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or continue) registering `identifier` as an implementation of `C`.
    pub fn register<C: Capability + ?Sized>(
        &mut self,
        identifier: impl Into<String>,
    ) -> Registrar<'_, C> {
        let implementations = self.entries.entry(identifier.into()).or_default();
        let capability = TypeId::of::<C>();
        let index = match implementations.iter().position(|e| e.capability == capability) {
            Some(index) => index,
            None => {
                implementations.push(ImplementationEntry {
                    capability,
                    capability_name: C::NAME,
                    order: None,
                    constructors: Vec::new(),
                });
                implementations.len() - 1
            }
        };
        Registrar {
            entry: &mut implementations[index],
            _capability: PhantomData,
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Capability names `identifier` is registered for.
    pub fn capabilities_of(&self, identifier: &str) -> Vec<&'static str> {
        self.entries
            .get(identifier)
            .into_iter()
            .flatten()
            .map(|e| e.capability_name)
            .collect()
    }

    /// Resolve `identifier` to a constructable descriptor for capability `C`.
    ///
    /// Fails with [`TrellisError::CapabilityMismatch`] when the identifier is
    /// registered only for other capabilities, and with
    /// [`TrellisError::FactoryInstantiation`] when it is unknown or has no
    /// constructor matching `signature`.
    pub fn describe<C: Capability + ?Sized>(
        &self,
        identifier: &str,
        signature: &Signature,
    ) -> Result<ImplementationDescriptor<C>, TrellisError> {
        let instantiation = |failure: FactoryFailure| TrellisError::FactoryInstantiation {
            capability: C::NAME.to_string(),
            identifier: identifier.to_string(),
            source: Box::new(failure),
        };

        let implementations = self
            .entries
            .get(identifier)
            .ok_or_else(|| instantiation(FactoryFailure::NotRegistered))?;

        let entry = implementations
            .iter()
            .find(|e| e.capability == TypeId::of::<C>())
            .ok_or_else(|| TrellisError::CapabilityMismatch {
                capability: C::NAME.to_string(),
                identifier: identifier.to_string(),
                implemented: self.capabilities_of(identifier).join(", "),
            })?;

        let constructor = entry
            .constructors
            .iter()
            .find(|c| c.signature == *signature)
            .ok_or_else(|| {
                let available: Vec<String> =
                    entry.constructors.iter().map(|c| c.signature.to_string()).collect();
                instantiation(FactoryFailure::NoMatchingConstructor {
                    requested: signature.clone(),
                    available: if available.is_empty() {
                        "none".to_string()
                    } else {
                        available.join(", ")
                    },
                })
            })?;

        let constructor = constructor
            .constructor
            .downcast_ref::<Arc<Constructor<C>>>()
            .cloned()
            .ok_or_else(|| {
                TrellisError::Internal(format!(
                    "constructor for {identifier} is not typed as {}",
                    C::NAME
                ))
            })?;

        Ok(ImplementationDescriptor {
            identifier: identifier.to_string(),
            order: entry.order,
            signature: signature.clone(),
            constructor,
        })
    }

    /// Every registration, sorted by identifier then capability.
    pub fn list_all(&self) -> Vec<FactoryInfo> {
        let mut all: Vec<FactoryInfo> = self
            .entries
            .iter()
            .flat_map(|(identifier, implementations)| {
                implementations.iter().map(move |e| FactoryInfo {
                    identifier: identifier.clone(),
                    capability: e.capability_name,
                    order: e.order,
                    signatures: e.constructors.iter().map(|c| c.signature.clone()).collect(),
                })
            })
            .collect();
        all.sort_by(|a, b| {
            a.identifier
                .cmp(&b.identifier)
                .then_with(|| a.capability.cmp(b.capability))
        });
        all
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identifiers: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        f.debug_struct("FactoryTable")
            .field("identifiers", &identifiers)
            .finish()
    }
}

/// Builder returned by [`FactoryTable::register`].
pub struct Registrar<'a, C: Capability + ?Sized> {
    entry: &'a mut ImplementationEntry,
    _capability: PhantomData<fn() -> Box<C>>,
}

impl<C: Capability + ?Sized> Registrar<'_, C> {
    /// Declare the order of this implementation. Lower values sort first.
    pub fn order(mut self, order: i32) -> Self {
        self.entry.order = Some(order);
        self
    }

    /// Register the constructor selected by `signature`, replacing any
    /// previous constructor with the same signature.
    pub fn constructor<F>(mut self, signature: Signature, constructor: F) -> Self
    where
        F: Fn(&Args) -> Result<Box<C>, BoxError> + Send + Sync + 'static,
    {
        let constructor: Arc<Constructor<C>> = Arc::new(constructor);
        let erased: Box<dyn Any + Send + Sync> = Box::new(constructor);
        match self
            .entry
            .constructors
            .iter_mut()
            .find(|c| c.signature == signature)
        {
            Some(existing) => existing.constructor = erased,
            None => self.entry.constructors.push(ConstructorEntry {
                signature,
                constructor: erased,
            }),
        }
        self
    }

    /// Register the no-argument constructor.
    pub fn no_arg<F>(self, constructor: F) -> Self
    where
        F: Fn() -> Box<C> + Send + Sync + 'static,
    {
        self.constructor(Signature::empty(), move |_| Ok(constructor()))
    }
}

/// A resolved implementation with the constructor chosen for one call.
pub struct ImplementationDescriptor<C: Capability + ?Sized> {
    identifier: String,
    order: Option<i32>,
    signature: Signature,
    constructor: Arc<Constructor<C>>,
}

impl<C: Capability + ?Sized> ImplementationDescriptor<C> {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Order declared at registration.
    pub fn order(&self) -> Option<i32> {
        self.order
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Construct an instance after checking `args` against the signature.
    pub fn instantiate(&self, args: &Args) -> Result<Box<C>, FactoryFailure> {
        args.conform_to(&self.signature)?;
        (self.constructor)(args).map_err(FactoryFailure::Constructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {
        fn greet(&self) -> String;
    }

    impl Capability for dyn Greeter {
        const NAME: &'static str = "svc.Greeter";
    }

    trait Clock {
        fn now(&self) -> u64;
    }

    impl Capability for dyn Clock {
        const NAME: &'static str = "svc.Clock";
    }

    struct Named(String);

    impl Greeter for Named {
        fn greet(&self) -> String {
            format!("hello from {}", self.0)
        }
    }

    impl Clock for Named {
        fn now(&self) -> u64 {
            42
        }
    }

    fn table() -> FactoryTable {
        let mut table = FactoryTable::new();
        table
            .register::<dyn Greeter>("pkg.Named")
            .order(3)
            .no_arg(|| Box::new(Named("default".into())))
            .constructor(Signature::of::<(String,)>(), |args| {
                let name = args.get::<String>(0)?;
                Ok(Box::new(Named(name.clone())))
            });
        table
            .register::<dyn Clock>("pkg.Named")
            .no_arg(|| Box::new(Named("clock".into())));
        table
    }

    #[test]
    fn describe_selects_constructor_by_signature() {
        let table = table();

        let no_arg = table
            .describe::<dyn Greeter>("pkg.Named", &Signature::empty())
            .unwrap();
        assert_eq!(no_arg.identifier(), "pkg.Named");
        assert_eq!(no_arg.order(), Some(3));
        assert_eq!(no_arg.instantiate(&Args::new()).unwrap().greet(), "hello from default");

        let named = table
            .describe::<dyn Greeter>("pkg.Named", &Signature::of::<(String,)>())
            .unwrap();
        let args = Args::new().with("bob".to_string());
        assert_eq!(named.instantiate(&args).unwrap().greet(), "hello from bob");
    }

    #[test]
    fn one_identifier_many_capabilities() {
        let table = table();
        let clock = table
            .describe::<dyn Clock>("pkg.Named", &Signature::empty())
            .unwrap();
        assert_eq!(clock.order(), None);
        assert_eq!(clock.instantiate(&Args::new()).unwrap().now(), 42);
        assert_eq!(table.capabilities_of("pkg.Named"), vec!["svc.Greeter", "svc.Clock"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_identifier_is_an_instantiation_failure() {
        let table = table();
        let err = table
            .describe::<dyn Greeter>("pkg.Missing", &Signature::empty())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            TrellisError::FactoryInstantiation { ref identifier, .. } if identifier == "pkg.Missing"
        ));
        assert!(err.to_string().contains("no factory is registered"));
    }

    #[test]
    fn missing_signature_lists_available_constructors() {
        let table = table();
        let err = table
            .describe::<dyn Greeter>("pkg.Named", &Signature::of::<(u32,)>())
            .err()
            .unwrap();
        let msg = err.to_string();
        assert!(msg.contains("no constructor with signature (u32)"), "got: {msg}");
        assert!(msg.contains("()"), "got: {msg}");
    }

    #[test]
    fn wrong_capability_is_a_mismatch() {
        trait Other {}
        impl Capability for dyn Other {
            const NAME: &'static str = "svc.Other";
        }

        let table = table();
        let err = table
            .describe::<dyn Other>("pkg.Named", &Signature::empty())
            .err()
            .unwrap();
        match err {
            TrellisError::CapabilityMismatch {
                capability,
                identifier,
                implemented,
            } => {
                assert_eq!(capability, "svc.Other");
                assert_eq!(identifier, "pkg.Named");
                assert_eq!(implemented, "svc.Greeter, svc.Clock");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn instantiate_rejects_nonconforming_args() {
        let table = table();
        let descriptor = table
            .describe::<dyn Greeter>("pkg.Named", &Signature::of::<(String,)>())
            .unwrap();
        let err = descriptor.instantiate(&Args::new().with(1u32)).err().unwrap();
        assert!(matches!(err, FactoryFailure::Arguments(_)));
    }

    #[test]
    fn reregistering_a_signature_replaces_it() {
        let mut table = table();
        table
            .register::<dyn Greeter>("pkg.Named")
            .no_arg(|| Box::new(Named("replaced".into())));
        let descriptor = table
            .describe::<dyn Greeter>("pkg.Named", &Signature::empty())
            .unwrap();
        assert_eq!(descriptor.instantiate(&Args::new()).unwrap().greet(), "hello from replaced");
        assert_eq!(descriptor.order(), Some(3));
    }

    #[test]
    fn list_all_is_sorted() {
        let mut table = table();
        table
            .register::<dyn Clock>("pkg.Atomic")
            .order(-1)
            .no_arg(|| Box::new(Named("atomic".into())));

        let all = table.list_all();
        let keys: Vec<(&str, &str)> = all
            .iter()
            .map(|info| (info.identifier.as_str(), info.capability))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("pkg.Atomic", "svc.Clock"),
                ("pkg.Named", "svc.Clock"),
                ("pkg.Named", "svc.Greeter"),
            ]
        );
        assert_eq!(all[2].signatures.len(), 2);
        assert!(format!("{table:?}").contains("pkg.Atomic"));
    }
}
