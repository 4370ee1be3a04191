//! Core types of the typekit trait engine.
//!
//! - [`RuntimeType`] and [`TypeHash`]: type identity and printable hashes
//! - [`TypeKind`], [`TypeFlags`], [`PrimitiveKind`]: what a resolved type is
//! - [`ValueKind`], [`AnyBitPattern`] and [`ValueType`]: byte-level semantics
//!   of value kinds
//! - [`TraitError`]: the error taxonomy shared by all crates

pub mod bits;
mod error;
mod primitive_kind;
mod runtime_type;
mod type_hash;
mod type_kind;
mod value_kind;
mod value_type;

pub use error::{TraitError, TraitResult};
pub use primitive_kind::PrimitiveKind;
pub use runtime_type::RuntimeType;
pub use type_hash::{TypeHash, hash_constants};
pub use type_kind::{TypeFlags, TypeKind};
pub use value_kind::{AnyBitPattern, ValueKind};
pub use value_type::{ValueKindExt, ValueType};
