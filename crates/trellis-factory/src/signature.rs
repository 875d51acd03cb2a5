// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constructor signatures and type-erased positional arguments.
//!
//! A [`Signature`] selects which registered constructor to call, the way a
//! parameter-type list selects a constructor overload. [`Args`] carries the
//! values positionally.

use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

use crate::error::ArgumentError;

/// One parameter type in a [`Signature`].
#[derive(Debug, Clone, Copy)]
pub struct ArgType {
    id: TypeId,
    name: &'static str,
}

impl ArgType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ArgType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgType {}

impl Hash for ArgType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Ordered parameter types identifying a constructor. Empty means no-arg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(Vec<ArgType>);

impl Signature {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Signature of a tuple of parameter types, e.g. `Signature::of::<(String, u32)>()`.
    pub fn of<T: ArgTypes>() -> Self {
        Self(T::arg_types())
    }

    pub fn params(&self) -> &[ArgType] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(arg.name)?;
        }
        f.write_str(")")
    }
}

impl FromIterator<ArgType> for Signature {
    fn from_iter<I: IntoIterator<Item = ArgType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Tuples of parameter types that can describe a [`Signature`].
pub trait ArgTypes {
    fn arg_types() -> Vec<ArgType>;
}

macro_rules! impl_arg_types {
    ($($name:ident),*) => {
        impl<$($name: Any),*> ArgTypes for ($($name,)*) {
            fn arg_types() -> Vec<ArgType> {
                vec![$(ArgType::of::<$name>()),*]
            }
        }
    };
}

impl_arg_types!();
impl_arg_types!(A);
impl_arg_types!(A, B);
impl_arg_types!(A, B, C);
impl_arg_types!(A, B, C, D);
impl_arg_types!(A, B, C, D, E);
impl_arg_types!(A, B, C, D, E, F);

/// Positional constructor arguments.
///
/// ```
/// use trellis_factory::{Args, Signature};
///
/// let args = Args::new().with("hello".to_string()).with(3u32);
/// assert_eq!(args.signature(), Signature::of::<(String, u32)>());
/// assert_eq!(args.get::<u32>(1).unwrap(), &3);
/// ```
#[derive(Default)]
pub struct Args(Vec<(ArgType, Box<dyn Any + Send + Sync>)>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.0.push((ArgType::of::<T>(), Box::new(value)));
    }

    /// Borrow the argument at `index` as a `T`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, ArgumentError> {
        let (arg_type, value) = self.0.get(index).ok_or(ArgumentError::Missing {
            index,
            expected: std::any::type_name::<T>(),
        })?;
        value
            .downcast_ref::<T>()
            .ok_or(ArgumentError::TypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
                actual: arg_type.name(),
            })
    }

    /// The signature these arguments satisfy.
    pub fn signature(&self) -> Signature {
        self.0.iter().map(|(arg_type, _)| *arg_type).collect()
    }

    /// Check the arguments positionally against `signature`.
    pub fn conform_to(&self, signature: &Signature) -> Result<(), ArgumentError> {
        let actual = self.signature();
        if actual == *signature {
            Ok(())
        } else {
            Err(ArgumentError::SignatureMismatch {
                expected: signature.clone(),
                actual,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Args").field(&self.signature()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_of_tuple_lists_types_in_order() {
        let sig = Signature::of::<(String, u32)>();
        assert_eq!(sig.len(), 2);
        assert_eq!(sig.params()[0], ArgType::of::<String>());
        assert_eq!(sig.params()[1], ArgType::of::<u32>());
        assert_eq!(
            sig.to_string(),
            format!("({}, u32)", std::any::type_name::<String>())
        );
        assert_ne!(sig, Signature::of::<(u32, String)>());
    }

    #[test]
    fn unit_signature_is_empty() {
        assert_eq!(Signature::of::<()>(), Signature::empty());
        assert!(Signature::empty().is_empty());
        assert_eq!(Signature::empty().to_string(), "()");
    }

    #[test]
    fn args_get_reports_missing_and_mistyped() {
        let args = Args::new().with(7i64);
        assert_eq!(args.get::<i64>(0).unwrap(), &7);
        assert_eq!(
            args.get::<String>(1).unwrap_err(),
            ArgumentError::Missing {
                index: 1,
                expected: std::any::type_name::<String>()
            }
        );
        assert!(matches!(
            args.get::<i32>(0).unwrap_err(),
            ArgumentError::TypeMismatch { index: 0, actual: "i64", .. }
        ));
    }

    #[test]
    fn conform_to_checks_every_position() {
        let args = Args::new().with("x".to_string()).with(1u8);
        assert!(args.conform_to(&Signature::of::<(String, u8)>()).is_ok());
        let err = args.conform_to(&Signature::of::<(String,)>()).unwrap_err();
        assert!(matches!(err, ArgumentError::SignatureMismatch { .. }));
        assert!(Args::new().conform_to(&Signature::empty()).is_ok());
        assert_eq!(format!("{:?}", Args::new()), "Args(Signature([]))");
    }
}
