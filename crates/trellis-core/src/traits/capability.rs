// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability marker implemented by every discoverable trait.

/// A trait (or type) that implementations are discovered for.
///
/// Usually implemented for a trait object, which is what the registry hands
/// back as `Box<dyn Greeter>`:
///
/// ```
/// use trellis_core::Capability;
///
/// pub trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// impl Capability for dyn Greeter {
///     const NAME: &'static str = "svc.Greeter";
/// }
/// ```
pub trait Capability: 'static {
    /// Manifest key under which implementations of this capability are listed.
    const NAME: &'static str;

    /// Order reported by a constructed instance, overriding the order declared
    /// at registration. Lower values sort first.
    fn instance_order(_instance: &Self) -> Option<i32> {
        None
    }
}
