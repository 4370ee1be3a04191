//! Implementation of the `#[derive(AnyBitPattern)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::derive_value_kind::{check_repr, collect_field_types};

pub fn derive_any_bit_pattern_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_any_bit_pattern_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_any_bit_pattern_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "AnyBitPattern cannot be derived for generic types",
        ));
    }

    check_repr(input, "AnyBitPattern")?;
    let field_types = collect_field_types(input, "AnyBitPattern")?;

    Ok(quote! {
        const _: fn() = || {
            fn assert_any_bit_pattern<T: ::typekit::AnyBitPattern>() {}
            #(assert_any_bit_pattern::<#field_types>();)*
        };

        // SAFETY: the struct is a padding-free `ValueKind` (supertrait) and
        // every field accepts any bit pattern, so the whole struct does.
        unsafe impl ::typekit::AnyBitPattern for #name {}
    })
}
