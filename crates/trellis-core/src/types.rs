// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the manifest store and the factory registry.

use serde::{Deserialize, Serialize};

/// Location searched when the caller does not name one.
pub const DEFAULT_FACTORIES_LOCATION: &str = "META-INF/trellis.factories";

/// Order value for instances that must come first.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Order value assigned to instances that declare no order.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Resource-resolution scope. Each context sees its own set of manifest
/// resources and owns its own cache partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadingContext(pub String);

impl LoadingContext {
    /// Name of the context every enumerator knows about.
    pub const SYSTEM: &'static str = "system";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The process-wide default context.
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LoadingContext {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Display for LoadingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoadingContext {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
