// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The merged capability → implementation-identifier mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Capability keys mapped to implementation identifiers.
///
/// Merging appends: identifiers from a later resource follow those of an
/// earlier one under the same key. Duplicates are kept here and removed by
/// the registry at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    entries: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `values` to the list under `key`.
    pub fn append<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Append every entry of `other` after the entries already present.
    pub fn merge(&mut self, other: Manifest) {
        for (key, values) in other.entries {
            self.append(key, values);
        }
    }

    /// Identifiers declared under `key`, empty if the key is absent.
    pub fn lookup(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Capability keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of capability keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Manifest
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut manifest = Manifest::new();
        for (key, values) in iter {
            manifest.append(key, values);
        }
        manifest
    }
}

/// Identifiers declared under `key` in `manifest`.
pub fn lookup<'a>(manifest: &'a Manifest, key: &str) -> &'a [String] {
    manifest.lookup(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_missing_key_is_empty() {
        let manifest = Manifest::new();
        assert!(manifest.lookup("svc.Greeter").is_empty());
        assert!(lookup(&manifest, "svc.Greeter").is_empty());
        assert!(manifest.is_empty());
    }

    #[test]
    fn merge_appends_per_key() {
        let mut first: Manifest = [("svc.Greeter", vec!["a", "b"]), ("svc.Clock", vec!["c"])]
            .into_iter()
            .collect();
        let second: Manifest = [("svc.Greeter", vec!["b", "d"])].into_iter().collect();
        first.merge(second);

        assert_eq!(first.lookup("svc.Greeter"), ["a", "b", "b", "d"]);
        assert_eq!(first.lookup("svc.Clock"), ["c"]);
        assert_eq!(first.len(), 2);
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["svc.Clock", "svc.Greeter"]);
    }

    #[test]
    fn key_with_no_values_is_present_but_empty() {
        let mut manifest = Manifest::new();
        manifest.append("svc.Empty", Vec::<String>::new());
        assert!(manifest.contains_key("svc.Empty"));
        assert!(manifest.lookup("svc.Empty").is_empty());
        assert_eq!(manifest.iter().count(), 1);
    }
}
