// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the registry and its collaborators.

pub mod capability;
pub mod resource;

pub use capability::Capability;
pub use resource::{Resource, ResourceEnumerator};
