// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::path::{Component, Path};

use crate::diagnostic::ConfigError;
use crate::model::TrellisConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TrellisConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let factories = &config.factories;

    if let Some(message) = check_location(&factories.default_location) {
        errors.push(ConfigError::Validation {
            message: format!("factories.default_location {message}"),
        });
    }

    if factories.default_context.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "factories.default_context must not be empty".to_string(),
        });
    }

    for (i, root) in factories.roots.iter().enumerate() {
        if root.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("factories.roots[{i}] must not be empty"),
            });
        }
    }

    for (name, context) in &factories.contexts {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "factories.contexts keys must not be empty".to_string(),
            });
        }
        for (i, root) in context.roots.iter().enumerate() {
            if root.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("factories.contexts.{name}.roots[{i}] must not be empty"),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns why `location` cannot name a resource below a root, if it can't.
pub fn check_location(location: &str) -> Option<&'static str> {
    if location.trim().is_empty() {
        return Some("must not be empty");
    }
    let path = Path::new(location);
    if path.is_absolute() || location.starts_with('/') {
        return Some("must be a relative path");
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Some("must not contain `..`");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContextConfig;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TrellisConfig::default()).is_ok());
    }

    #[test]
    fn empty_location_fails_validation() {
        let mut config = TrellisConfig::default();
        config.factories.default_location = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "default_location must not be empty"));
    }

    #[test]
    fn absolute_location_fails_validation() {
        let mut config = TrellisConfig::default();
        config.factories.default_location = "/etc/trellis.factories".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "relative path"));
    }

    #[test]
    fn parent_dir_location_fails_validation() {
        let mut config = TrellisConfig::default();
        config.factories.default_location = "META-INF/../../secret".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "`..`"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = TrellisConfig::default();
        config.factories.default_location = String::new();
        config.factories.default_context = String::new();
        config.factories.roots = vec!["/ok".into(), "".into()];
        config.factories.contexts.insert(
            "tenant-a".into(),
            ContextConfig {
                roots: vec![" ".into()],
            },
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(has_error(&errors, "factories.roots[1]"));
        assert!(has_error(&errors, "factories.contexts.tenant-a.roots[0]"));
    }

    #[test]
    fn nested_relative_location_passes() {
        assert_eq!(check_location("META-INF/custom/app.factories"), None);
    }
}
