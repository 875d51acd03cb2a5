// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest parsing, merging, and caching.
//!
//! A manifest is a properties file mapping capability keys to
//! comma-separated implementation identifiers. Every resource found at a
//! location is parsed and merged into one [`Manifest`], which the
//! [`ManifestStore`] caches per loading context and location.

pub mod cache;
pub mod enumerator;
pub mod manifest;
pub mod parser;
pub mod store;

pub use cache::{CacheKey, ManifestCache};
pub use enumerator::{DirectoryEnumerator, EmbeddedEnumerator};
pub use manifest::{Manifest, lookup};
pub use parser::{ParseError, parse_manifest};
pub use store::ManifestStore;
