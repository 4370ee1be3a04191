//! Typekit Proc Macros
//!
//! # Macros
//!
//! - `#[derive(ValueKind)]` - Implement `ValueKind` and `Reflect` for a
//!   padding-free struct
//! - `#[derive(AnyBitPattern)]` - Mark a value kind whose fields all accept
//!   any bit pattern, making it a valid `bit_cast` target
//!
//! # Example
//!
//! ```ignore
//! use typekit::{AnyBitPattern, ValueKind};
//!
//! #[derive(Clone, Copy, ValueKind, AnyBitPattern)]
//! #[repr(C)]
//! pub struct Guid {
//!     pub bytes: [u8; 16],
//! }
//! ```

use proc_macro::TokenStream;

mod derive_any_bit_pattern;
mod derive_value_kind;

/// Derive `ValueKind` and `Reflect` for a struct.
///
/// The struct must:
///
/// - have no generic parameters,
/// - be `#[repr(C)]`, `#[repr(transparent)]` or `#[repr(packed)]`,
/// - consist only of `ValueKind` fields,
/// - contain no padding (checked at compile time).
///
/// `Copy` is not derived; add `#[derive(Clone, Copy)]` alongside.
#[proc_macro_derive(ValueKind)]
pub fn derive_value_kind(input: TokenStream) -> TokenStream {
    derive_value_kind::derive_value_kind_impl(input)
}

/// Derive `AnyBitPattern` for a struct that also derives `ValueKind`.
///
/// Same layout rules as `ValueKind`; in addition every field must itself be
/// `AnyBitPattern`, which excludes `bool` and `char`.
#[proc_macro_derive(AnyBitPattern)]
pub fn derive_any_bit_pattern(input: TokenStream) -> TokenStream {
    derive_any_bit_pattern::derive_any_bit_pattern_impl(input)
}
