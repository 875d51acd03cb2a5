// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample capabilities and implementations.
//!
//! [`greeter_table`] registers every sample under the identifiers exported
//! here, so manifests in tests can name them directly.

use trellis_core::Capability;
use trellis_factory::{FactoryTable, Signature};

pub const ENGLISH: &str = "fixtures.EnglishGreeter";
pub const FRENCH: &str = "fixtures.FrenchGreeter";
pub const POLITE: &str = "fixtures.PoliteGreeter";
pub const UNORDERED: &str = "fixtures.UnorderedGreeter";
pub const DYNAMIC: &str = "fixtures.DynamicGreeter";
pub const BROKEN: &str = "fixtures.BrokenGreeter";
pub const FIXED_CLOCK: &str = "fixtures.FixedClock";

/// Produces a greeting.
pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;

    /// Order reported by the instance itself.
    fn priority(&self) -> Option<i32> {
        None
    }
}

impl Capability for dyn Greeter {
    const NAME: &'static str = "svc.Greeter";

    fn instance_order(instance: &Self) -> Option<i32> {
        instance.priority()
    }
}

/// Reports a timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

impl Capability for dyn Clock {
    const NAME: &'static str = "svc.Clock";
}

pub struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {name}")
    }
}

pub struct FrenchGreeter;

impl Greeter for FrenchGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Bonjour, {name}")
    }
}

pub struct PoliteGreeter {
    title: String,
}

impl Greeter for PoliteGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Good day, {} {name}", self.title)
    }
}

pub struct UnorderedGreeter;

impl Greeter for UnorderedGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hi, {name}")
    }
}

/// Greeter whose order is chosen when it is constructed.
pub struct DynamicGreeter {
    priority: i32,
}

impl Greeter for DynamicGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hey {name} (priority {})", self.priority)
    }

    fn priority(&self) -> Option<i32> {
        Some(self.priority)
    }
}

pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

/// A table with every sample implementation registered.
///
/// | identifier | order | constructors |
/// |---|---|---|
/// | [`ENGLISH`] | 10 | `()` |
/// | [`FRENCH`] | 5 | `()` |
/// | [`POLITE`] | 7 | `()`, `(String)` |
/// | [`UNORDERED`] | none | `()` |
/// | [`DYNAMIC`] | 100 | `()` reports -1, `(i32)` reports its argument |
/// | [`BROKEN`] | 1 | `()` always fails |
/// | [`FIXED_CLOCK`] | none | `()`, registered as `svc.Clock` |
pub fn greeter_table() -> FactoryTable {
    let mut table = FactoryTable::new();
    table
        .register::<dyn Greeter>(ENGLISH)
        .order(10)
        .no_arg(|| Box::new(EnglishGreeter));
    table
        .register::<dyn Greeter>(FRENCH)
        .order(5)
        .no_arg(|| Box::new(FrenchGreeter));
    table
        .register::<dyn Greeter>(POLITE)
        .order(7)
        .no_arg(|| {
            Box::new(PoliteGreeter {
                title: "friend".to_string(),
            })
        })
        .constructor(Signature::of::<(String,)>(), |args| {
            let title = args.get::<String>(0)?;
            Ok(Box::new(PoliteGreeter {
                title: title.clone(),
            }))
        });
    table
        .register::<dyn Greeter>(UNORDERED)
        .no_arg(|| Box::new(UnorderedGreeter));
    table
        .register::<dyn Greeter>(DYNAMIC)
        .order(100)
        .no_arg(|| Box::new(DynamicGreeter { priority: -1 }))
        .constructor(Signature::of::<(i32,)>(), |args| {
            let priority = *args.get::<i32>(0)?;
            Ok(Box::new(DynamicGreeter { priority }))
        });
    table
        .register::<dyn Greeter>(BROKEN)
        .order(1)
        .constructor(Signature::empty(), |_| Err("greeting catalog unavailable".into()));
    table
        .register::<dyn Clock>(FIXED_CLOCK)
        .no_arg(|| Box::new(FixedClock(1_700_000_000)));
    table
}
