//! Value-kind trait provider.
//!
//! [`ValueType<V>`] bundles the default value and the byte-level operations
//! of one value kind. The registry keeps a single shared instance per type;
//! [`ValueKindExt`] exposes the same operations as methods on values.

use std::cmp::Ordering;
use std::fmt;
use std::mem::size_of;

use crate::{AnyBitPattern, RuntimeType, TraitError, TraitResult, ValueKind, bits};

/// Default value and bitwise semantics of a value kind `V`.
pub struct ValueType<V> {
    runtime_type: RuntimeType,
    default_value: V,
    is_default: fn(&V) -> bool,
}

impl<V> ValueType<V> {
    pub fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    /// The default-ness test as a plain function pointer.
    ///
    /// Reference-free, so it can be adopted by callers that only know `V`
    /// as a generic parameter.
    pub fn predicate(&self) -> fn(&V) -> bool {
        self.is_default
    }
}

impl<V: Clone> ValueType<V> {
    /// The zero-initialized value.
    pub fn default_value(&self) -> V {
        self.default_value.clone()
    }
}

impl<V: ValueKind> ValueType<V> {
    /// Resolve the provider for `V`.
    ///
    /// Fails if the `ValueKind` impl reports fewer field bytes than the type
    /// occupies, i.e. the layout has padding that `as_binary` would expose.
    pub fn new() -> TraitResult<Self> {
        let runtime_type = RuntimeType::of::<V>();
        if V::FIELD_BYTES != size_of::<V>() {
            return Err(TraitError::initialization(
                &runtime_type,
                format!(
                    "{} field bytes in {} bytes of storage; value kinds must not contain padding",
                    V::FIELD_BYTES,
                    size_of::<V>()
                ),
            ));
        }

        Ok(Self {
            runtime_type,
            default_value: bits::zeroed(),
            is_default: bits::is_zeroed::<V>,
        })
    }

    /// Storage size in bytes.
    pub fn size(&self) -> usize {
        size_of::<V>()
    }

    /// Check whether `value` is bit-for-bit equal to the default.
    pub fn is_default(&self, value: &V) -> bool {
        (self.is_default)(value)
    }

    /// An independent copy of the storage bytes.
    pub fn as_binary(&self, value: &V) -> Box<[u8]> {
        bits::as_bytes(value).into()
    }

    pub fn bitwise_equals(&self, a: &V, b: &V) -> bool {
        bits::bitwise_eq(a, b)
    }

    pub fn bitwise_hash(&self, value: &V) -> u64 {
        bits::bitwise_hash(value)
    }

    pub fn bitwise_compare(&self, a: &V, b: &V) -> Ordering {
        bits::bitwise_cmp(a, b)
    }

    /// Reinterpret `value` as a `W` of the same size.
    pub fn bit_cast<W: AnyBitPattern>(&self, value: V) -> TraitResult<W> {
        bits::bit_cast(value)
    }
}

impl<V> fmt::Debug for ValueType<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueType")
            .field("runtime_type", &self.runtime_type)
            .finish_non_exhaustive()
    }
}

/// Bitwise operations as methods on any value kind.
pub trait ValueKindExt: ValueKind {
    /// Check whether every byte is zero.
    fn is_default_bits(&self) -> bool {
        bits::is_zeroed(self)
    }

    fn as_binary(&self) -> Box<[u8]> {
        bits::as_bytes(self).into()
    }

    fn bitwise_eq(&self, other: &Self) -> bool {
        bits::bitwise_eq(self, other)
    }

    fn bitwise_hash(&self) -> u64 {
        bits::bitwise_hash(self)
    }

    fn bitwise_cmp(&self, other: &Self) -> Ordering {
        bits::bitwise_cmp(self, other)
    }

    fn bit_cast<W: AnyBitPattern>(self) -> TraitResult<W> {
        bits::bit_cast(self)
    }
}

impl<V: ValueKind> ValueKindExt for V {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    #[repr(C)]
    struct Padded {
        tag: u8,
        value: u32,
    }

    // SAFETY: deliberately wrong; only used to check resolution refuses it.
    unsafe impl ValueKind for Padded {
        const FIELD_BYTES: usize = 5;
    }

    #[test]
    fn default_is_zero() {
        let provider = ValueType::<u64>::new().unwrap();
        assert_eq!(provider.default_value(), 0);
        assert!(provider.is_default(&provider.default_value()));
        assert!(!provider.is_default(&1));
    }

    #[test]
    fn predicate_matches_is_default() {
        let provider = ValueType::<[i16; 4]>::new().unwrap();
        let predicate = provider.predicate();
        for value in [[0; 4], [0, 0, 0, 1], [-1; 4]] {
            assert_eq!(predicate(&value), provider.is_default(&value));
        }
    }

    #[test]
    fn as_binary_is_independent_copy() {
        let provider = ValueType::<u32>::new().unwrap();
        let mut value = 0xaabb_ccdd_u32;
        let bytes = provider.as_binary(&value);
        value = 0;

        assert_eq!(bytes.len(), provider.size());
        assert_eq!(&*bytes, &0xaabb_ccdd_u32.to_ne_bytes());
        assert_eq!(value, 0);
    }

    #[test]
    fn bitwise_equals_agrees_with_binary() {
        let provider = ValueType::<[f32; 2]>::new().unwrap();
        let pairs = [([1.0, 2.0], [1.0, 2.0]), ([0.0, 0.0], [-0.0, 0.0]), ([f32::NAN, 1.0], [f32::NAN, 1.0])];
        for (a, b) in pairs {
            assert_eq!(provider.bitwise_equals(&a, &b), provider.as_binary(&a) == provider.as_binary(&b));
        }
    }

    #[test]
    fn compare_and_hash_follow_equality() {
        let provider = ValueType::<[u8; 4]>::new().unwrap();
        let a = [1, 2, 3, 4];
        let b = [1, 2, 3, 4];
        let c = [1, 2, 3, 5];

        assert_eq!(provider.bitwise_compare(&a, &b), Ordering::Equal);
        assert_eq!(provider.bitwise_hash(&a), provider.bitwise_hash(&b));
        assert_eq!(provider.bitwise_compare(&a, &c), Ordering::Less);
    }

    #[test]
    fn bit_cast_through_provider() {
        let provider = ValueType::<[u8; 4]>::new().unwrap();
        let value: u32 = provider.bit_cast([1, 0, 0, 0]).unwrap();
        assert_eq!(value, u32::from_ne_bytes([1, 0, 0, 0]));
        assert!(provider.bit_cast::<u16>([1, 0, 0, 0]).unwrap_err().is_size_mismatch());
    }

    #[test]
    fn bool_provider() {
        let provider = ValueType::<bool>::new().unwrap();
        assert!(!provider.default_value());
        assert!(provider.is_default(&false));
        assert!(!provider.is_default(&true));
        assert_eq!(provider.bit_cast::<u8>(true).unwrap(), 1);
    }

    #[test]
    fn padding_fails_resolution() {
        let err = ValueType::<Padded>::new().unwrap_err();
        assert!(err.is_initialization());
        assert!(err.to_string().contains("padding"));
    }

    #[test]
    fn extension_methods() {
        assert!(0u16.is_default_bits());
        assert!(!7u16.is_default_bits());
        assert!(7u16.bitwise_eq(&7));
        assert_eq!(1u8.bitwise_cmp(&2), Ordering::Less);
        assert_eq!(&*0x0102_u16.as_binary(), &0x0102_u16.to_ne_bytes());
        assert_eq!(3u64.bitwise_hash(), 3u64.bitwise_hash());
        assert_eq!(i32::MIN.bit_cast::<u32>().unwrap(), 0x8000_0000);
    }
}
