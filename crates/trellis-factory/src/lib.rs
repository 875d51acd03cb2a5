// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pluggable factory registry.
//!
//! Implementations of a capability are named in manifests and registered
//! in a [`FactoryTable`]. The [`FactoryRegistry`] reads the manifest,
//! constructs every listed implementation, and returns them in order.

pub mod error;
pub mod registry;
pub mod signature;
pub mod submission;
pub mod table;

pub use error::{ArgumentError, FactoryFailure};
pub use registry::FactoryRegistry;
pub use signature::{ArgType, ArgTypes, Args, Signature};
pub use submission::FactorySubmission;
pub use table::{Constructor, FactoryInfo, FactoryTable, ImplementationDescriptor, Registrar};

pub use inventory;
