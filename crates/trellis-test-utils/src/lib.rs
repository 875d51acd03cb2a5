// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Trellis integration tests.
//!
//! Provides sample capabilities, instrumented resource enumerators, and a
//! harness that lays manifests out in a temporary directory.
//!
//! # Components
//!
//! - [`fixtures`] - `Greeter` and `Clock` capabilities with sample implementations
//! - [`CountingEnumerator`] - Wraps an enumerator and counts enumerations
//! - [`FailingEnumerator`] - Always fails with an I/O error
//! - [`TestHarness`] - Temp-dir manifests plus a ready registry

pub mod enumerators;
pub mod fixtures;
pub mod harness;

pub use enumerators::{CountingEnumerator, FailingEnumerator};
pub use harness::TestHarness;
