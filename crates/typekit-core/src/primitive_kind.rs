//! Primitive numeric kinds.
//!
//! The numeric conversion table of the operator resolver is keyed by these.

use std::any::TypeId;
use std::fmt;
use std::mem::size_of;

/// Built-in integer and floating point types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Every primitive kind, signed integers first.
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::I128,
        PrimitiveKind::Isize,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::U128,
        PrimitiveKind::Usize,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
    ];

    /// Primitive kind of `T`, if `T` is a numeric primitive.
    pub fn of<T: ?Sized + 'static>() -> Option<Self> {
        Self::from_type_id(TypeId::of::<T>())
    }

    /// Primitive kind for a `TypeId`, if it names a numeric primitive.
    pub fn from_type_id(id: TypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_id() == id)
    }

    /// The `TypeId` of the Rust type this kind stands for.
    pub fn type_id(self) -> TypeId {
        match self {
            PrimitiveKind::I8 => TypeId::of::<i8>(),
            PrimitiveKind::I16 => TypeId::of::<i16>(),
            PrimitiveKind::I32 => TypeId::of::<i32>(),
            PrimitiveKind::I64 => TypeId::of::<i64>(),
            PrimitiveKind::I128 => TypeId::of::<i128>(),
            PrimitiveKind::Isize => TypeId::of::<isize>(),
            PrimitiveKind::U8 => TypeId::of::<u8>(),
            PrimitiveKind::U16 => TypeId::of::<u16>(),
            PrimitiveKind::U32 => TypeId::of::<u32>(),
            PrimitiveKind::U64 => TypeId::of::<u64>(),
            PrimitiveKind::U128 => TypeId::of::<u128>(),
            PrimitiveKind::Usize => TypeId::of::<usize>(),
            PrimitiveKind::F32 => TypeId::of::<f32>(),
            PrimitiveKind::F64 => TypeId::of::<f64>(),
        }
    }

    /// Get the Rust name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::I128 => "i128",
            PrimitiveKind::Isize => "isize",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::U128 => "u128",
            PrimitiveKind::Usize => "usize",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
        }
    }

    /// Storage size in bytes on the current target.
    pub const fn size(self) -> usize {
        match self {
            PrimitiveKind::I8 | PrimitiveKind::U8 => 1,
            PrimitiveKind::I16 | PrimitiveKind::U16 => 2,
            PrimitiveKind::I32 | PrimitiveKind::U32 | PrimitiveKind::F32 => 4,
            PrimitiveKind::I64 | PrimitiveKind::U64 | PrimitiveKind::F64 => 8,
            PrimitiveKind::I128 | PrimitiveKind::U128 => 16,
            PrimitiveKind::Isize | PrimitiveKind::Usize => size_of::<usize>(),
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::F32 | PrimitiveKind::F64)
    }

    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Signed integers and floats.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::I8
                | PrimitiveKind::I16
                | PrimitiveKind::I32
                | PrimitiveKind::I64
                | PrimitiveKind::I128
                | PrimitiveKind::Isize
                | PrimitiveKind::F32
                | PrimitiveKind::F64
        )
    }

    /// Number of bits that carry magnitude.
    ///
    /// Integers: width minus the sign bit. Floats: significand precision.
    pub const fn precision_bits(self) -> u32 {
        match self {
            PrimitiveKind::F32 => f32::MANTISSA_DIGITS,
            PrimitiveKind::F64 => f64::MANTISSA_DIGITS,
            _ => {
                let bits = (self.size() * 8) as u32;
                if self.is_signed() { bits - 1 } else { bits }
            }
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_recognizes_primitives() {
        assert_eq!(PrimitiveKind::of::<u8>(), Some(PrimitiveKind::U8));
        assert_eq!(PrimitiveKind::of::<i128>(), Some(PrimitiveKind::I128));
        assert_eq!(PrimitiveKind::of::<f64>(), Some(PrimitiveKind::F64));
        assert_eq!(PrimitiveKind::of::<usize>(), Some(PrimitiveKind::Usize));
    }

    #[test]
    fn of_rejects_non_primitives() {
        assert_eq!(PrimitiveKind::of::<bool>(), None);
        assert_eq!(PrimitiveKind::of::<[u8; 4]>(), None);
        assert_eq!(PrimitiveKind::of::<str>(), None);
    }

    #[test]
    fn type_id_round_trips() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_type_id(kind.type_id()), Some(kind));
        }
    }

    #[test]
    fn sizes_match_rust_layout() {
        assert_eq!(PrimitiveKind::I16.size(), size_of::<i16>());
        assert_eq!(PrimitiveKind::U128.size(), size_of::<u128>());
        assert_eq!(PrimitiveKind::Isize.size(), size_of::<isize>());
        assert_eq!(PrimitiveKind::F32.size(), size_of::<f32>());
    }

    #[test]
    fn precision() {
        assert_eq!(PrimitiveKind::I8.precision_bits(), 7);
        assert_eq!(PrimitiveKind::U8.precision_bits(), 8);
        assert_eq!(PrimitiveKind::F32.precision_bits(), 24);
        assert_eq!(PrimitiveKind::F64.precision_bits(), 53);
    }

    #[test]
    fn signedness() {
        assert!(PrimitiveKind::I32.is_signed());
        assert!(!PrimitiveKind::U32.is_signed());
        assert!(PrimitiveKind::F32.is_signed());
        assert!(PrimitiveKind::F32.is_float());
        assert!(PrimitiveKind::Usize.is_integer());
    }

    #[test]
    fn display() {
        assert_eq!(PrimitiveKind::Usize.to_string(), "usize");
    }
}
