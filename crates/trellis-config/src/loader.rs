// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./trellis.toml` > `~/.config/trellis/trellis.toml` > `/etc/trellis/trellis.toml`
//! with environment variable overrides via `TRELLIS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TrellisConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trellis/trellis.toml` (system-wide)
/// 3. `~/.config/trellis/trellis.toml` (user XDG config)
/// 4. `./trellis.toml` (local directory)
/// 5. `TRELLIS_*` environment variables
pub fn load_config() -> Result<TrellisConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrellisConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TrellisConfig::default()))
        .merge(Toml::file("/etc/trellis/trellis.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("trellis/trellis.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("trellis.toml"))
        .merge(env_provider())
}

/// Environment provider with an explicit section-to-dot mapping.
///
/// `Env::split("_")` would turn `TRELLIS_FACTORIES_DEFAULT_LOCATION` into
/// `factories.default.location`; only the section prefix is split here.
/// Keys reach the mapper with their original case.
fn env_provider() -> Env {
    Env::prefixed("TRELLIS_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("factories_", "factories.", 1)
            .into()
    })
}
