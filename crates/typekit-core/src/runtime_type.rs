//! Runtime type identity.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TypeHash;

/// The runtime descriptor of a concrete type.
///
/// Two `RuntimeType`s are equal iff they describe the same Rust type; the
/// comparison uses [`TypeId`] only. The remaining fields are informational.
#[derive(Clone, Copy)]
pub struct RuntimeType {
    id: TypeId,
    hash: TypeHash,
    name: &'static str,
    size: usize,
    align: usize,
}

impl RuntimeType {
    /// Descriptor for `T`.
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            hash: TypeHash::of::<T>(),
            name: std::any::type_name::<T>(),
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Name hash, for logs and diagnostics.
    #[inline]
    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    /// Rust type name as reported by `std::any::type_name`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Storage size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    /// Check whether this descriptor names `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for RuntimeType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RuntimeType {}

impl Hash for RuntimeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_is_equal() {
        assert_eq!(RuntimeType::of::<u32>(), RuntimeType::of::<u32>());
        assert_ne!(RuntimeType::of::<u32>(), RuntimeType::of::<i32>());
    }

    #[test]
    fn records_layout() {
        let ty = RuntimeType::of::<[u16; 3]>();
        assert_eq!(ty.size(), 6);
        assert_eq!(ty.align(), 2);
        assert!(ty.is::<[u16; 3]>());
        assert!(!ty.is::<[u16; 4]>());
    }

    #[test]
    fn name_and_hash_agree() {
        let ty = RuntimeType::of::<u64>();
        assert_eq!(ty.name(), "u64");
        assert_eq!(ty.hash(), TypeHash::from_name("u64"));
        assert_eq!(ty.to_string(), "u64");
    }

    #[test]
    fn hashes_like_type_id() {
        use std::collections::HashSet;

        let set: HashSet<RuntimeType> =
            [RuntimeType::of::<u8>(), RuntimeType::of::<u8>(), RuntimeType::of::<i8>()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
