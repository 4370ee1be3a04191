//! Deterministic hash-based type naming.
//!
//! [`TypeHash`] is a 64-bit XXH64 hash of a type name. It is used as a
//! compact, printable key in diagnostics and logs. It is *not* the identity
//! key of the registries: two distinct Rust types can share a
//! `std::any::type_name`, so identity is always decided by
//! [`TypeId`](std::any::TypeId) (see [`RuntimeType`](crate::RuntimeType)).
//!
//! # Examples
//!
//! ```
//! use typekit_core::TypeHash;
//!
//! let a = TypeHash::from_name("u32");
//! let b = TypeHash::from_name("u32");
//! assert_eq!(a, b);
//!
//! let pair = TypeHash::from_conversion(TypeHash::of::<u8>(), TypeHash::of::<u32>());
//! assert_ne!(pair, TypeHash::from_conversion(TypeHash::of::<u32>(), TypeHash::of::<u8>()));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// Keep type hashes and conversion-pair hashes in separate domains so a pair
/// never collides with a plain type name.
pub mod hash_constants {
    /// Separator constant for combining components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for conversion (source, target) pairs.
    pub const CONVERSION: u64 = 0x3e9f5d2a8c7b1403;

    /// Marker for the source position of a pair.
    pub const SOURCE: u64 = 0x9e3779b97f4a7c15;

    /// Marker for the target position of a pair.
    pub const TARGET: u64 = 0xbf58476d1ce4e5b9;
}

/// A deterministic 64-bit hash of a type name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of `std::any::type_name::<T>()`.
    ///
    /// Stable for a given compiler and crate graph, which is all diagnostics need.
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        Self::from_name(std::any::type_name::<T>())
    }

    /// Hash of an ordered `(source, target)` pair.
    ///
    /// Order matters: `u8 -> u32` and `u32 -> u8` hash differently.
    #[inline]
    pub fn from_conversion(source: TypeHash, target: TypeHash) -> Self {
        let hash = hash_constants::CONVERSION
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(hash_constants::SOURCE ^ source.0);
        // wrapping_mul keeps the combination non-commutative
        TypeHash(hash.wrapping_mul(hash_constants::SEP).wrapping_add(hash_constants::TARGET ^ target.0))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        assert_eq!(TypeHash::from_name("u32"), TypeHash::from_name("u32"));
        assert_eq!(TypeHash::of::<Vec<u8>>(), TypeHash::of::<Vec<u8>>());
    }

    #[test]
    fn type_hash_uniqueness() {
        let a = TypeHash::of::<u8>();
        let b = TypeHash::of::<i8>();
        let c = TypeHash::of::<[u8; 16]>();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn of_matches_from_name() {
        assert_eq!(TypeHash::of::<u64>(), TypeHash::from_name(std::any::type_name::<u64>()));
    }

    #[test]
    fn conversion_pair_order_matters() {
        let a = TypeHash::of::<u8>();
        let b = TypeHash::of::<u32>();

        assert_ne!(TypeHash::from_conversion(a, b), TypeHash::from_conversion(b, a));
        assert_eq!(TypeHash::from_conversion(a, b), TypeHash::from_conversion(a, b));
    }

    #[test]
    fn conversion_pair_differs_from_type() {
        let a = TypeHash::of::<u8>();
        assert_ne!(TypeHash::from_conversion(a, a), a);
    }

    #[test]
    fn empty_hash() {
        assert!(TypeHash::EMPTY.is_empty());
        assert!(!TypeHash::of::<u8>().is_empty());
    }

    #[test]
    fn hash_display() {
        let display = format!("{}", TypeHash::of::<u8>());
        assert!(display.starts_with("0x"));
        assert_eq!(display.len(), 18);
    }

    #[test]
    fn hash_debug() {
        let debug = format!("{:?}", TypeHash::of::<u8>());
        assert!(debug.starts_with("TypeHash(0x"));
    }

    #[test]
    fn type_hash_as_u64() {
        let hash = TypeHash(0x123456789abcdef0);
        assert_eq!(hash.as_u64(), 0x123456789abcdef0);
    }
}
