// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trellis factory registry.
//!
//! This crate provides the error taxonomy, the loading-context handle, and the
//! two trait seams the rest of the workspace is built around: [`Capability`]
//! for discoverable traits and [`ResourceEnumerator`] for manifest discovery.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, TrellisError};
pub use traits::{Capability, Resource, ResourceEnumerator};
pub use types::{
    DEFAULT_FACTORIES_LOCATION, HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE, LoadingContext,
};
