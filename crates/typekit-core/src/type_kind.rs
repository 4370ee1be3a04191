//! Storage model of a reflected type.

use bitflags::bitflags;

use crate::PrimitiveKind;

/// How instances of a type are stored and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Compared and copied by full content.
    Value {
        /// Size in bytes.
        size: usize,
        /// Alignment requirement.
        align: usize,
    },

    /// Accessed through a shared handle; the default is the null handle.
    Reference,
}

impl TypeKind {
    /// Create a value type kind with size and alignment from a type.
    pub fn value<T>() -> Self {
        TypeKind::Value {
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, TypeKind::Value { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, TypeKind::Reference)
    }
}

bitflags! {
    /// Capability summary of a resolved type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        /// Stored and compared by content.
        const VALUE = 1 << 0;
        /// Stored behind a nullable handle.
        const REFERENCE = 1 << 1;
        /// Built-in numeric primitive.
        const PRIMITIVE = 1 << 2;
        /// Integer primitive.
        const INTEGER = 1 << 3;
        /// Floating point primitive.
        const FLOAT = 1 << 4;
        /// Signed numeric primitive.
        const SIGNED = 1 << 5;
        /// Occupies no storage.
        const ZERO_SIZED = 1 << 6;
    }
}

impl TypeFlags {
    /// Derive flags from a storage kind and an optional primitive kind.
    pub fn describe(kind: TypeKind, primitive: Option<PrimitiveKind>) -> Self {
        let mut flags = match kind {
            TypeKind::Value { size, .. } => {
                let mut flags = TypeFlags::VALUE;
                if size == 0 {
                    flags |= TypeFlags::ZERO_SIZED;
                }
                flags
            }
            TypeKind::Reference => TypeFlags::REFERENCE,
        };

        if let Some(primitive) = primitive {
            flags |= TypeFlags::PRIMITIVE;
            flags |= if primitive.is_float() {
                TypeFlags::FLOAT
            } else {
                TypeFlags::INTEGER
            };
            if primitive.is_signed() {
                flags |= TypeFlags::SIGNED;
            }
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_records_layout() {
        assert_eq!(TypeKind::value::<u64>(), TypeKind::Value { size: 8, align: std::mem::align_of::<u64>() });
        assert!(TypeKind::value::<u8>().is_value());
        assert!(TypeKind::Reference.is_reference());
    }

    #[test]
    fn flags_for_signed_integer() {
        let flags = TypeFlags::describe(TypeKind::value::<i32>(), Some(PrimitiveKind::I32));
        assert!(flags.contains(TypeFlags::VALUE | TypeFlags::PRIMITIVE | TypeFlags::INTEGER | TypeFlags::SIGNED));
        assert!(!flags.contains(TypeFlags::FLOAT));
    }

    #[test]
    fn flags_for_float() {
        let flags = TypeFlags::describe(TypeKind::value::<f32>(), Some(PrimitiveKind::F32));
        assert!(flags.contains(TypeFlags::FLOAT | TypeFlags::SIGNED));
        assert!(!flags.contains(TypeFlags::INTEGER));
    }

    #[test]
    fn flags_for_reference() {
        let flags = TypeFlags::describe(TypeKind::Reference, None);
        assert_eq!(flags, TypeFlags::REFERENCE);
    }

    #[test]
    fn flags_for_zero_sized() {
        let flags = TypeFlags::describe(TypeKind::value::<()>(), None);
        assert_eq!(flags, TypeFlags::VALUE | TypeFlags::ZERO_SIZED);
    }
}
