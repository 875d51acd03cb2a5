// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instrumented resource enumerators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use trellis_core::{LoadingContext, Resource, ResourceEnumerator, TrellisError};

/// Delegates to another enumerator and records how often it was asked.
pub struct CountingEnumerator {
    inner: Arc<dyn ResourceEnumerator>,
    calls: AtomicUsize,
}

impl CountingEnumerator {
    pub fn new(inner: Arc<dyn ResourceEnumerator>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `enumerate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResourceEnumerator for CountingEnumerator {
    fn enumerate(
        &self,
        context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<Resource>, TrellisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.enumerate(context, location)
    }
}

/// Fails every enumeration with an I/O error.
#[derive(Debug, Default)]
pub struct FailingEnumerator;

impl ResourceEnumerator for FailingEnumerator {
    fn enumerate(
        &self,
        _context: &LoadingContext,
        location: &str,
    ) -> Result<Vec<Resource>, TrellisError> {
        Err(TrellisError::ResourceEnumeration {
            location: location.to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "resource roots unreadable",
            )),
        })
    }
}
