// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trellis factory registry.

use thiserror::Error;

/// Boxed error used as the underlying cause of registry failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type surfaced by manifest loading and factory resolution.
#[derive(Debug, Error)]
pub enum TrellisError {
    /// Configuration errors (invalid TOML, bad locations, unknown contexts).
    #[error("configuration error: {0}")]
    Config(String),

    /// A resource location was empty or escapes its enumeration root.
    #[error("invalid resource location `{0}`")]
    InvalidLocation(String),

    /// The resource enumeration mechanism itself failed.
    #[error("unable to enumerate resources at location [{location}]: {source}")]
    ResourceEnumeration { location: String, source: BoxError },

    /// A discovered resource could not be read or parsed as a manifest.
    #[error("unable to load factories from location [{location}] ({resource}): {source}")]
    ManifestLoad {
        location: String,
        resource: String,
        source: BoxError,
    },

    /// A declared implementation is not registered for the requested capability.
    #[error("{identifier} is not assignable to {capability} (implements: {implemented})")]
    CapabilityMismatch {
        capability: String,
        identifier: String,
        implemented: String,
    },

    /// Resolving, selecting a constructor for, or constructing an implementation failed.
    #[error("cannot instantiate {capability} : {identifier}: {source}")]
    FactoryInstantiation {
        capability: String,
        identifier: String,
        source: BoxError,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrellisError {
    /// Returns the implementation identifier a resolution error refers to, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TrellisError::CapabilityMismatch { identifier, .. }
            | TrellisError::FactoryInstantiation { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}
