//! Raw byte-level operations on value kinds.
//!
//! These never consult `PartialEq`, `Hash` or `Ord` of the type: two values
//! are "bitwise equal" iff their storage bytes are identical. `0.0_f32` and
//! `-0.0_f32` are different here, and a NaN is equal to itself.

use std::cmp::Ordering;
use std::mem::size_of;

use xxhash_rust::xxh64::xxh64;

use crate::{AnyBitPattern, RuntimeType, TraitError, TraitResult, ValueKind};

/// Borrow the storage bytes of `value`.
#[inline]
pub fn as_bytes<V: ValueKind>(value: &V) -> &[u8] {
    // SAFETY: `ValueKind` guarantees there is no padding, so every one of the
    // `size_of::<V>()` bytes behind the reference is initialized.
    unsafe { std::slice::from_raw_parts((value as *const V).cast::<u8>(), size_of::<V>()) }
}

/// The all-zero instance of `V`.
#[inline]
pub fn zeroed<V: ValueKind>() -> V {
    // SAFETY: `ValueKind` guarantees the all-zero bit pattern is valid.
    unsafe { std::mem::zeroed() }
}

/// Check whether every byte of `value` is zero.
#[inline]
pub fn is_zeroed<V: ValueKind>(value: &V) -> bool {
    as_bytes(value).iter().all(|&byte| byte == 0)
}

#[inline]
pub fn bitwise_eq<V: ValueKind>(a: &V, b: &V) -> bool {
    as_bytes(a) == as_bytes(b)
}

/// XXH64 of the storage bytes. Equal for bitwise-equal values.
#[inline]
pub fn bitwise_hash<V: ValueKind>(value: &V) -> u64 {
    xxh64(as_bytes(value), 0)
}

/// Lexicographic comparison of the storage bytes.
#[inline]
pub fn bitwise_cmp<V: ValueKind>(a: &V, b: &V) -> Ordering {
    as_bytes(a).cmp(as_bytes(b))
}

/// Reinterpret the storage of `value` as a `W`.
///
/// Fails with [`TraitError::SizeMismatch`] unless both types have the same
/// size. No numeric conversion happens: `bit_cast::<f32, u32>(1.0)` yields
/// `0x3f80_0000`. The result depends on the target's endianness. The source
/// may be any value kind, the target must accept every bit pattern.
pub fn bit_cast<V: ValueKind, W: AnyBitPattern>(value: V) -> TraitResult<W> {
    if size_of::<V>() != size_of::<W>() {
        return Err(TraitError::size_mismatch(&RuntimeType::of::<V>(), &RuntimeType::of::<W>()));
    }

    // SAFETY: sizes are equal, `W` accepts any bit pattern and the read is
    // unaligned so `W` may have a stricter alignment than `V`.
    Ok(unsafe { std::ptr::read_unaligned((&value as *const V).cast::<W>()) })
}
