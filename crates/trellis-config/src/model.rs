// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Trellis factory registry.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trellis_core::{DEFAULT_FACTORIES_LOCATION, LoadingContext};

/// Top-level Trellis configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrellisConfig {
    /// Manifest discovery and resolution settings.
    #[serde(default)]
    pub factories: FactoriesConfig,
}

/// Manifest discovery settings consumed by the factory registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FactoriesConfig {
    /// Manifest location used when a caller does not name one.
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Loading context used by the registry's convenience resolve forms.
    #[serde(default = "default_context")]
    pub default_context: String,

    /// Directories searched from every loading context, in order.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Additional directories visible only from the named context.
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextConfig>,
}

impl Default for FactoriesConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            default_context: default_context(),
            roots: Vec::new(),
            contexts: BTreeMap::new(),
        }
    }
}

impl FactoriesConfig {
    /// The configured default context as a [`LoadingContext`].
    pub fn loading_context(&self) -> LoadingContext {
        LoadingContext::new(self.default_context.clone())
    }
}

/// Per-context resource roots.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Directories searched after the shared roots for this context.
    #[serde(default)]
    pub roots: Vec<String>,
}

fn default_location() -> String {
    DEFAULT_FACTORIES_LOCATION.to_string()
}

fn default_context() -> String {
    LoadingContext::SYSTEM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_standard_location() {
        let config = TrellisConfig::default();
        assert_eq!(config.factories.default_location, "META-INF/trellis.factories");
        assert_eq!(config.factories.default_context, "system");
        assert!(config.factories.roots.is_empty());
        assert!(config.factories.contexts.is_empty());
        assert_eq!(config.factories.loading_context(), LoadingContext::system());
    }

    #[test]
    fn contexts_table_deserializes() {
        let toml_str = r#"
[factories]
roots = ["/opt/plugins"]

[factories.contexts.tenant-a]
roots = ["/srv/a"]

[factories.contexts.tenant-b]
"#;
        let config: TrellisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.factories.roots, vec!["/opt/plugins"]);
        assert_eq!(config.factories.contexts.len(), 2);
        assert_eq!(config.factories.contexts["tenant-a"].roots, vec!["/srv/a"]);
        assert!(config.factories.contexts["tenant-b"].roots.is_empty());
    }

    #[test]
    fn contexts_deny_unknown_fields() {
        let toml_str = r#"
[factories.contexts.tenant-a]
rots = ["/srv/a"]
"#;
        assert!(toml::from_str::<TrellisConfig>(toml_str).is_err());
    }
}
