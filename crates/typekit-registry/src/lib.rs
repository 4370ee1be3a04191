//! Type-trait registry and conversion operators.
//!
//! - [`TypeRegistry`] resolves, once per type, the default value and the
//!   default-ness test of every [`Reflect`] type and caches the result
//! - [`OperatorResolver`] finds conversion operators between types
//! - [`Type<T>`] is the static façade over the global instances of both

mod facade;
mod locks;
mod metrics;
mod operator;
mod options;
mod reflect;
mod registry;

pub use facade::{Type, convert};
pub use metrics::{MetricsCollector, NoopMetrics};
pub use operator::{
    Conversion, ConversionKind, ConvertFn, Operator, OperatorKind, OperatorResolver,
};
pub use options::ResolverOptions;
pub use reflect::{Handle, Reflect, Resolution};
pub use registry::{TypeEntry, TypeRegistry};

pub use typekit_core::{
    AnyBitPattern, PrimitiveKind, RuntimeType, TraitError, TraitResult, TypeFlags, TypeHash,
    TypeKind, ValueKind, ValueKindExt, ValueType,
};
