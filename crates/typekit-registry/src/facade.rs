//! `Type<T>` - the generic façade over the global registry and resolver.
//!
//! ```
//! use typekit_registry::Type;
//!
//! assert_eq!(Type::<u32>::default_value(), 0);
//! assert!(Type::<Option<std::sync::Arc<str>>>::default_value().is_none());
//! assert_eq!(Type::<f64>::convert(7u8).unwrap(), 7.0);
//! ```
//!
//! Trait resolution is lazy: the first call for a given `T` resolves its
//! entry in [`TypeRegistry::global`], every later call reads the cached
//! entry. A failed resolution is permanent; the infallible accessors panic
//! with the recorded error, [`Type::try_entry`] returns it.

use std::marker::PhantomData;

use typekit_core::{RuntimeType, TraitError, TraitResult, TypeFlags, TypeKind, ValueKind, ValueType};

use crate::operator::OperatorResolver;
use crate::reflect::Reflect;
use crate::registry::{TypeEntry, TypeRegistry};

/// Static access to the traits of `T`.
pub struct Type<T>(PhantomData<fn() -> T>);

impl<T: 'static> Type<T> {
    pub fn runtime_type() -> RuntimeType {
        RuntimeType::of::<T>()
    }

    /// Check whether a `U` may be assigned to a `T`: `U` is `T` or reaches
    /// it through registered upcasts.
    pub fn is_assignable_from<U: 'static>() -> bool {
        OperatorResolver::global().is_assignable::<U, T>()
    }

    /// Check whether a `T` may be assigned to a `U`.
    pub fn is_assignable_to<U: 'static>() -> bool {
        Type::<U>::is_assignable_from::<T>()
    }

    /// Convert `value` with any available operator.
    pub fn try_convert<U: 'static>(value: U) -> Option<T> {
        OperatorResolver::global().try_convert(value)
    }

    /// Convert `value`, failing with `InvalidConversion` when no operator
    /// exists.
    pub fn convert<U: 'static>(value: U) -> TraitResult<T> {
        OperatorResolver::global().convert(value)
    }
}

impl<T: Reflect> Type<T> {
    /// The resolved entry, or the error that made resolution fail.
    pub fn try_entry() -> TraitResult<&'static TypeEntry<T>> {
        TypeRegistry::global().entry::<T>()
    }

    /// The resolved entry.
    ///
    /// # Panics
    ///
    /// If resolution of `T` failed.
    pub fn entry() -> &'static TypeEntry<T> {
        match Self::try_entry() {
            Ok(entry) => entry,
            Err(err) => panic!("{err}"),
        }
    }

    /// The default value: zeroes for value kinds, `None` for handles.
    pub fn default_value() -> T {
        Self::entry().default_value()
    }

    pub fn is_default(value: &T) -> bool {
        Self::entry().is_default(value)
    }

    /// The default-ness test chosen when `T` was resolved.
    pub fn is_default_predicate() -> fn(&T) -> bool {
        Self::entry().is_default_predicate()
    }

    pub fn kind() -> TypeKind {
        Self::entry().kind()
    }

    pub fn flags() -> TypeFlags {
        Self::entry().flags()
    }

    /// Convert `value` into `out`. On failure `out` receives the default
    /// value and `false` is returned.
    pub fn try_convert_into<U: 'static>(value: U, out: &mut T) -> bool {
        match Self::try_convert(value) {
            Some(converted) => {
                *out = converted;
                true
            }
            None => {
                *out = Self::default_value();
                false
            }
        }
    }
}

impl<T: ValueKind> Type<T> {
    /// The shared value-kind provider of `T`.
    pub fn value_type() -> TraitResult<&'static ValueType<T>> {
        TypeRegistry::global().value_type::<T>()
    }
}

/// Shorthand for [`Type::convert`] with the target inferred.
pub fn convert<U: 'static, T: 'static>(value: U) -> Result<T, TraitError> {
    Type::<T>::convert(value)
}
