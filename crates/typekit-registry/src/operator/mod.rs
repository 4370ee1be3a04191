//! Conversion operators.
//!
//! An operator converts a `U` into a `T`. The [`OperatorResolver`] finds one
//! for a pair of types, trying in order:
//!
//! 1. Identity (`U == T`)
//! 2. A direct registration for `(U, T)`: upcast, user implicit, user
//!    explicit or a built-in numeric conversion
//! 3. A chain of upcasts through the type hierarchy (shortest path)
//!
//! Every operator carries a [`Conversion`] describing its kind and cost.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

mod hierarchy;
mod numeric;
mod resolver;

pub use resolver::OperatorResolver;

/// Which operators a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Only conversions that may be applied without a cast.
    Implicit,
    /// Any conversion; implicit ones are preferred.
    Explicit,
}

/// A type conversion with its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// The kind of conversion being performed.
    pub kind: ConversionKind,
    /// The cost of this conversion (lower is better).
    pub cost: u32,
    /// Whether this conversion can be applied implicitly.
    pub is_implicit: bool,
}

/// The kind of conversion being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// No conversion needed (exact match).
    Identity,

    /// Derived type to one of its bases.
    Upcast {
        /// Number of hierarchy edges crossed.
        hops: u32,
    },

    /// Numeric conversion to a type that holds every source value.
    Widening,

    /// Numeric conversion that may lose range or precision.
    Narrowing,

    /// Integer conversion between same-sized types of different signedness.
    SignChange,

    /// Integer to floating point.
    IntToFloat,

    /// Floating point to integer (truncating, saturating).
    FloatToInt,

    /// User-registered implicit conversion.
    UserImplicit,

    /// User-registered explicit conversion.
    UserExplicit,
}

impl Conversion {
    /// Cost for exact match (identity conversion).
    pub const COST_EXACT: u32 = 0;
    /// Cost for numeric widening (i8 -> i32, f32 -> f64).
    pub const COST_WIDENING: u32 = 4;
    /// Cost for numeric narrowing (i32 -> i8, f64 -> f32).
    pub const COST_NARROWING: u32 = 5;
    /// Cost for signed to unsigned integer conversion.
    pub const COST_SIGNED_TO_UNSIGNED: u32 = 6;
    /// Cost for unsigned to signed integer conversion.
    pub const COST_UNSIGNED_TO_SIGNED: u32 = 7;
    /// Cost for integer to float conversion.
    pub const COST_INT_TO_FLOAT: u32 = 8;
    /// Cost for float to integer conversion.
    pub const COST_FLOAT_TO_INT: u32 = 9;
    /// Cost per hierarchy edge of an upcast.
    pub const COST_UPCAST: u32 = 10;
    /// Cost for user-defined implicit conversion.
    pub const COST_USER_IMPLICIT: u32 = 12;
    /// Cost marker for explicit-only conversions (not usable implicitly).
    pub const COST_EXPLICIT_ONLY: u32 = 100;

    /// Create an identity conversion (no conversion needed).
    pub fn identity() -> Self {
        Self {
            kind: ConversionKind::Identity,
            cost: Self::COST_EXACT,
            is_implicit: true,
        }
    }

    /// An upcast crossing `hops` hierarchy edges.
    pub fn upcast(hops: u32) -> Self {
        Self {
            kind: ConversionKind::Upcast { hops },
            cost: Self::COST_UPCAST * hops,
            is_implicit: true,
        }
    }

    pub fn user_implicit() -> Self {
        Self {
            kind: ConversionKind::UserImplicit,
            cost: Self::COST_USER_IMPLICIT,
            is_implicit: true,
        }
    }

    pub fn user_explicit() -> Self {
        Self {
            kind: ConversionKind::UserExplicit,
            cost: Self::COST_EXPLICIT_ONLY,
            is_implicit: false,
        }
    }

    /// Check if this conversion can be used implicitly.
    pub fn is_implicit(&self) -> bool {
        self.is_implicit
    }

    /// Check if this is an exact match (no conversion).
    pub fn is_exact(&self) -> bool {
        matches!(self.kind, ConversionKind::Identity)
    }

    /// Check whether a lookup of `kind` may return this conversion.
    pub fn permits(&self, kind: OperatorKind) -> bool {
        match kind {
            OperatorKind::Implicit => self.is_implicit,
            OperatorKind::Explicit => true,
        }
    }
}

/// A shared, typed conversion function.
pub type ConvertFn<U, T> = Arc<dyn Fn(U) -> T + Send + Sync>;

/// A conversion function from `U` to `T` together with its classification.
pub struct Operator<U, T> {
    conversion: Conversion,
    func: ConvertFn<U, T>,
}

impl<U, T> Operator<U, T> {
    pub(crate) fn new(conversion: Conversion, func: ConvertFn<U, T>) -> Self {
        Self { conversion, func }
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Apply the conversion.
    pub fn invoke(&self, value: U) -> T {
        (self.func)(value)
    }
}

impl<U, T> Clone for Operator<U, T> {
    fn clone(&self) -> Self {
        Self {
            conversion: self.conversion,
            func: Arc::clone(&self.func),
        }
    }
}

impl<U, T> fmt::Debug for Operator<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("conversion", &self.conversion)
            .finish_non_exhaustive()
    }
}

/// One step of an upcast chain with the value types erased.
pub(crate) type ErasedFn = Arc<dyn Fn(Box<dyn Any>) -> Option<Box<dyn Any>> + Send + Sync>;

/// A registered operator in both typed and erased form.
#[derive(Clone)]
pub(crate) struct Registered {
    pub(crate) conversion: Conversion,
    /// A `ConvertFn<U, T>` behind `dyn Any`.
    pub(crate) typed: Arc<dyn Any + Send + Sync>,
    pub(crate) erased: ErasedFn,
}

impl Registered {
    pub(crate) fn new<U: 'static, T: 'static>(
        conversion: Conversion,
        func: impl Fn(U) -> T + Send + Sync + 'static,
    ) -> Self {
        let typed: ConvertFn<U, T> = Arc::new(func);
        let step = Arc::clone(&typed);
        let erased: ErasedFn = Arc::new(move |value: Box<dyn Any>| {
            let value = value.downcast::<U>().ok()?;
            Some(Box::new(step(*value)) as Box<dyn Any>)
        });

        Self {
            conversion,
            typed: Arc::new(typed),
            erased,
        }
    }

    #[cfg(test)]
    pub(crate) fn operator<U: 'static, T: 'static>(&self) -> Option<Operator<U, T>> {
        typed_operator(self.conversion, &self.typed)
    }
}

pub(crate) fn typed_operator<U: 'static, T: 'static>(
    conversion: Conversion,
    typed: &Arc<dyn Any + Send + Sync>,
) -> Option<Operator<U, T>> {
    typed
        .downcast_ref::<ConvertFn<U, T>>()
        .map(|func| Operator::new(conversion, Arc::clone(func)))
}
