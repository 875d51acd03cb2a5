// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compile-time factory registration.
//!
//! Crates that provide implementations submit a [`FactorySubmission`] with
//! `inventory::submit!`; [`FactoryTable::from_submissions`] runs every
//! submitted registration function at startup.
//!
//! ```ignore
//! trellis_factory::inventory::submit! {
//!     trellis_factory::FactorySubmission::new("pkg.EnglishGreeter", |table| {
//!         table
//!             .register::<dyn Greeter>("pkg.EnglishGreeter")
//!             .order(10)
//!             .no_arg(|| Box::new(EnglishGreeter));
//!     })
//! }
//! ```

use tracing::debug;

use crate::table::FactoryTable;

/// A registration function contributed by a linked crate.
pub struct FactorySubmission {
    /// Identifier the submission registers, used for logging.
    pub identifier: &'static str,
    pub register: fn(&mut FactoryTable),
}

impl FactorySubmission {
    pub const fn new(identifier: &'static str, register: fn(&mut FactoryTable)) -> Self {
        Self {
            identifier,
            register,
        }
    }
}

inventory::collect!(FactorySubmission);

impl FactoryTable {
    /// A table holding every submitted registration.
    pub fn from_submissions() -> Self {
        let mut table = Self::new();
        table.register_submissions();
        table
    }

    /// Run every submitted registration function against this table.
    pub fn register_submissions(&mut self) {
        let mut count = 0usize;
        for submission in inventory::iter::<FactorySubmission> {
            (submission.register)(self);
            count += 1;
            debug!(identifier = submission.identifier, "factory submission registered");
        }
        debug!(submissions = count, identifiers = self.len(), "factory table built");
    }
}
