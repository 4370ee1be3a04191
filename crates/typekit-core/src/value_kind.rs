//! The `ValueKind` and `AnyBitPattern` marker traits.
//!
//! A value kind is a type whose instances are compared and copied by their
//! full byte content. Its bytes may be read and its all-zero instance is
//! valid. [`AnyBitPattern`] additionally accepts every bit pattern, which is
//! what a raw reinterpretation into the type needs.
//!
//! | Type                                  | `ValueKind` | `AnyBitPattern` |
//! |---------------------------------------|-------------|-----------------|
//! | numeric primitives, `()`              | yes         | yes             |
//! | `bool`, `char`                        | yes         | no              |
//! | `[V; N]`                              | if `V` is   | if `V` is       |
//! | `uuid::Uuid` (feature `uuid`)         | yes         | yes             |
//!
//! User structs use `#[derive(ValueKind)]`, and `#[derive(AnyBitPattern)]`
//! when every field accepts any bit pattern:
//!
//! ```ignore
//! #[derive(Clone, Copy, ValueKind, AnyBitPattern)]
//! #[repr(C)]
//! struct Sample {
//!     id: u64,
//!     value: f64,
//! }
//! ```
//!
//! The derives reject non-`repr(C)`/`repr(transparent)`/`repr(packed)`
//! structs and fail to compile if the layout contains padding.

use std::mem::size_of;

/// Types that may be viewed as raw bytes and have a valid all-zero value.
///
/// # Safety
///
/// Implementors guarantee that:
/// - the type has no padding bytes (every byte of storage is initialized),
/// - the all-zero bit pattern is a valid value,
/// - the type holds no pointers or references.
///
/// The layout is only as portable as the type's `repr`: bytes produced on a
/// target with a different endianness or layout are not meaningful here.
pub unsafe trait ValueKind: Copy + Send + Sync + 'static {
    /// Sum of the storage of all fields.
    ///
    /// Equal to `size_of::<Self>()` for a layout without padding. The trait
    /// registry refuses to resolve a type where the two disagree.
    const FIELD_BYTES: usize = size_of::<Self>();
}

/// Value kinds for which every bit pattern is a valid value.
///
/// Required of the target of a raw reinterpretation (`bit_cast`).
///
/// # Safety
///
/// Implementors guarantee that any `size_of::<Self>()` initialized bytes
/// form a valid value.
pub unsafe trait AnyBitPattern: ValueKind {}

macro_rules! impl_value_kind {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive numeric types have no padding and accept any bit pattern.
            unsafe impl ValueKind for $ty {}
            // SAFETY: as above.
            unsafe impl AnyBitPattern for $ty {}
        )*
    };
}

impl_value_kind!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ());

// SAFETY: one initialized byte; zero is `false`.
unsafe impl ValueKind for bool {}

// SAFETY: four initialized bytes; zero is `'\0'`.
unsafe impl ValueKind for char {}

// SAFETY: array elements are laid out contiguously without gaps.
unsafe impl<V: ValueKind, const N: usize> ValueKind for [V; N] {
    const FIELD_BYTES: usize = V::FIELD_BYTES * N;
}

// SAFETY: each element accepts any bit pattern.
unsafe impl<V: AnyBitPattern, const N: usize> AnyBitPattern for [V; N] {}

// SAFETY: `Uuid` is a transparent wrapper over `[u8; 16]`.
#[cfg(feature = "uuid")]
unsafe impl ValueKind for uuid::Uuid {}

// SAFETY: as above.
#[cfg(feature = "uuid")]
unsafe impl AnyBitPattern for uuid::Uuid {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_field_bytes_match_size() {
        assert_eq!(<u8 as ValueKind>::FIELD_BYTES, 1);
        assert_eq!(<i64 as ValueKind>::FIELD_BYTES, 8);
        assert_eq!(<f32 as ValueKind>::FIELD_BYTES, 4);
        assert_eq!(<() as ValueKind>::FIELD_BYTES, 0);
        assert_eq!(<bool as ValueKind>::FIELD_BYTES, 1);
        assert_eq!(<char as ValueKind>::FIELD_BYTES, 4);
    }

    #[test]
    fn array_field_bytes_scale() {
        assert_eq!(<[u32; 4] as ValueKind>::FIELD_BYTES, 16);
        assert_eq!(<[[u8; 3]; 5] as ValueKind>::FIELD_BYTES, 15);
        assert_eq!(<[u64; 0] as ValueKind>::FIELD_BYTES, 0);
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuid_is_sixteen_bytes() {
        assert_eq!(<uuid::Uuid as ValueKind>::FIELD_BYTES, 16);
    }
}
