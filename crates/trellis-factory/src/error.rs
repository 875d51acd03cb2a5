// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Causes wrapped by [`TrellisError::FactoryInstantiation`](trellis_core::TrellisError).

use thiserror::Error;
use trellis_core::BoxError;

use crate::signature::Signature;

/// Problems with the positional arguments handed to a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("missing argument {index} (expected {expected})")]
    Missing { index: usize, expected: &'static str },

    #[error("argument {index} is {actual}, expected {expected}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("arguments {actual} do not match constructor signature {expected}")]
    SignatureMismatch {
        expected: Signature,
        actual: Signature,
    },
}

/// Why a single implementation could not be instantiated.
#[derive(Debug, Error)]
pub enum FactoryFailure {
    #[error("no factory is registered under this identifier")]
    NotRegistered,

    #[error("no constructor with signature {requested} (available: {available})")]
    NoMatchingConstructor {
        requested: Signature,
        available: String,
    },

    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    #[error("constructor failed: {0}")]
    Constructor(#[source] BoxError),
}
