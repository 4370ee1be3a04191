//! The `Reflect` resolution hook.
//!
//! Every type usable with [`Type`](crate::Type) reports, once, which storage
//! model it follows. The registry turns that [`Resolution`] into a cached
//! [`TypeEntry`](crate::TypeEntry) so callers never branch on the model
//! themselves.
//!
//! | Shape                          | Default | Default-ness test             |
//! |--------------------------------|---------|-------------------------------|
//! | value kind (`u32`, `[u8; 16]`) | zeroes  | all bytes zero                |
//! | tuple of value kinds           | zeroes  | every component zero          |
//! | `Option<H>`, `H: Handle`       | `None`  | `Option::is_none` (no deref)  |
//!
//! Tuples may carry padding between components, so they are composites of
//! value kinds rather than value kinds themselves.

use std::sync::Arc;

use typekit_core::{TraitResult, ValueKind, ValueType, bits};

use crate::TypeRegistry;

/// How the registry obtains the default and the default-ness test of `T`.
pub enum Resolution<T: 'static> {
    /// Delegate to the shared value-kind provider of `T`.
    Value(fn(&TypeRegistry) -> TraitResult<&ValueType<T>>),

    /// Stored inline, but compared field by field rather than by bytes.
    Composite {
        default: fn() -> T,
        is_default: fn(&T) -> bool,
    },

    /// Reference-like: the default is the null handle, tested by identity.
    Reference {
        null: fn() -> T,
        is_null: fn(&T) -> bool,
    },
}

impl<T: ValueKind> Resolution<T> {
    /// Resolve through [`TypeRegistry::value_type`].
    pub fn value() -> Self {
        Resolution::Value(TypeRegistry::value_type::<T>)
    }
}

impl<T: 'static> Resolution<T> {
    pub fn reference(null: fn() -> T, is_null: fn(&T) -> bool) -> Self {
        Resolution::Reference { null, is_null }
    }

    pub fn composite(default: fn() -> T, is_default: fn(&T) -> bool) -> Self {
        Resolution::Composite { default, is_default }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Resolution::Value(_))
    }
}

/// Types whose traits can be resolved by the registry.
///
/// Implemented for the primitives, `()`, arrays and tuples of value kinds,
/// `Option<H>` for every [`Handle`], and by `#[derive(ValueKind)]`.
pub trait Reflect: Clone + Send + Sync + 'static {
    /// Report the storage model. Only called until `T` is resolved; must
    /// return the same answer every time.
    fn resolve() -> Resolution<Self>;
}

/// Shared pointer types whose `Option` is a nullable reference.
pub trait Handle: Clone + Send + Sync + 'static {}

impl<X: ?Sized + Send + Sync + 'static> Handle for Arc<X> {}

impl<X: ?Sized + Sync + 'static> Handle for &'static X {}

impl<H: Handle> Reflect for Option<H> {
    fn resolve() -> Resolution<Self> {
        Resolution::reference(|| None, Option::is_none)
    }
}

macro_rules! impl_reflect_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn resolve() -> Resolution<Self> {
                    Resolution::value()
                }
            }
        )*
    };
}

impl_reflect_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, ()
);

#[cfg(feature = "uuid")]
impl_reflect_value!(uuid::Uuid);

impl<V: ValueKind, const N: usize> Reflect for [V; N] {
    fn resolve() -> Resolution<Self> {
        Resolution::value()
    }
}

macro_rules! impl_reflect_tuple {
    ($(($($name:ident $idx:tt),+))+) => {
        $(
            impl<$($name: ValueKind),+> Reflect for ($($name,)+) {
                fn resolve() -> Resolution<Self> {
                    Resolution::composite(
                        || ($(bits::zeroed::<$name>(),)+),
                        |value: &Self| true $(&& bits::is_zeroed(&value.$idx))+,
                    )
                }
            }
        )+
    };
}

impl_reflect_tuple! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_resolve_as_values() {
        assert!(u32::resolve().is_value());
        assert!(<[f64; 3]>::resolve().is_value());
        assert!(<()>::resolve().is_value());
        assert!(bool::resolve().is_value());
        assert!(char::resolve().is_value());
    }

    #[test]
    fn tuples_resolve_componentwise() {
        match <(u8, u32)>::resolve() {
            Resolution::Composite { default, is_default } => {
                assert_eq!(default(), (0, 0));
                assert!(is_default(&(0, 0)));
                assert!(!is_default(&(0, 1)));
                assert!(!is_default(&(1, 0)));
            }
            _ => panic!("tuples must resolve as composites"),
        }
    }

    #[test]
    fn options_of_handles_resolve_as_references() {
        match <Option<Arc<String>>>::resolve() {
            Resolution::Reference { null, is_null } => {
                assert!(is_null(&null()));
                assert!(!is_null(&Some(Arc::new(String::new()))));
            }
            _ => panic!("Option<Arc<_>> must resolve as a reference"),
        }
    }

    #[test]
    fn static_references_are_handles() {
        static ANSWER: u32 = 42;
        match <Option<&'static u32>>::resolve() {
            Resolution::Reference { is_null, .. } => assert!(!is_null(&Some(&ANSWER))),
            _ => panic!("Option<&'static _> must resolve as a reference"),
        }
    }
}
