//! Error types for type-trait resolution and conversion.
//!
//! ```text
//! TraitError
//! ├── SizeMismatch       - raw reinterpretation between types of different size
//! ├── InvalidConversion  - no operator converts the source type to the target type
//! └── Initialization     - first-use resolution of a type failed (permanent)
//! ```

use thiserror::Error;

use crate::RuntimeType;

/// Errors raised by the trait engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraitError {
    /// `bit_cast` between value kinds whose storage sizes differ.
    #[error("cannot reinterpret {from} ({from_size} bytes) as {to} ({to_size} bytes)")]
    SizeMismatch {
        from: &'static str,
        from_size: usize,
        to: &'static str,
        to_size: usize,
    },

    /// No conversion operator exists between two types.
    #[error("no conversion from {from} to {to}")]
    InvalidConversion { from: &'static str, to: &'static str },

    /// Resolving a type's traits failed. Recorded once and returned on every
    /// later access to that type.
    #[error("failed to resolve traits of {type_name}: {reason}")]
    Initialization { type_name: &'static str, reason: String },
}

impl TraitError {
    /// `SizeMismatch` for a cast from `from` to `to`.
    pub fn size_mismatch(from: &RuntimeType, to: &RuntimeType) -> Self {
        TraitError::SizeMismatch {
            from: from.name(),
            from_size: from.size(),
            to: to.name(),
            to_size: to.size(),
        }
    }

    /// `InvalidConversion` for a conversion from `from` to `to`.
    pub fn invalid_conversion(from: &RuntimeType, to: &RuntimeType) -> Self {
        TraitError::InvalidConversion {
            from: from.name(),
            to: to.name(),
        }
    }

    /// `Initialization` failure for `ty`.
    pub fn initialization(ty: &RuntimeType, reason: impl Into<String>) -> Self {
        TraitError::Initialization {
            type_name: ty.name(),
            reason: reason.into(),
        }
    }

    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, TraitError::SizeMismatch { .. })
    }

    pub fn is_invalid_conversion(&self) -> bool {
        matches!(self, TraitError::InvalidConversion { .. })
    }

    pub fn is_initialization(&self) -> bool {
        matches!(self, TraitError::Initialization { .. })
    }
}

/// Result alias for trait engine operations.
pub type TraitResult<T> = Result<T, TraitError>;
