//! Typekit: per-type default values, bitwise semantics and conversions.
//!
//! ```
//! use std::sync::Arc;
//! use typekit::{Type, ValueKind, ValueKindExt};
//!
//! #[derive(Clone, Copy, ValueKind)]
//! #[repr(C)]
//! struct Sample {
//!     id: u32,
//!     value: f32,
//! }
//!
//! let sample = Type::<Sample>::default_value();
//! assert!(Type::<Sample>::is_default(&sample));
//! assert_eq!(sample.as_binary().len(), 8);
//!
//! assert!(Type::<Option<Arc<String>>>::default_value().is_none());
//! assert_eq!(Type::<u64>::convert(9u8).unwrap(), 9);
//! ```
//!
//! # Crates
//!
//! - `typekit-core`: type identity, value kinds and errors
//! - `typekit-registry`: the trait registry, operator resolver and [`Type`]
//! - `typekit-macros`: `#[derive(ValueKind)]` and `#[derive(AnyBitPattern)]`

extern crate self as typekit;

pub use typekit_core::{
    AnyBitPattern, PrimitiveKind, RuntimeType, TraitError, TraitResult, TypeFlags, TypeHash,
    TypeKind, ValueKind, ValueKindExt, ValueType, bits, hash_constants,
};
pub use typekit_macros::{AnyBitPattern, ValueKind};
pub use typekit_registry::{
    Conversion, ConversionKind, ConvertFn, Handle, MetricsCollector, NoopMetrics, Operator,
    OperatorKind, OperatorResolver, Reflect, Resolution, ResolverOptions, Type, TypeEntry,
    TypeRegistry, convert,
};

pub mod prelude {
    pub use crate::{
        AnyBitPattern, Reflect, TraitError, TraitResult, Type, ValueKind, ValueKindExt,
    };
}
