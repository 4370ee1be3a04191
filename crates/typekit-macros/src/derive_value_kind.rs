//! Implementation of the `#[derive(ValueKind)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Type, parse_macro_input};

pub fn derive_value_kind_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_value_kind_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_value_kind_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ValueKind cannot be derived for generic types",
        ));
    }

    check_repr(input, "ValueKind")?;
    let field_types = collect_field_types(input, "ValueKind")?;

    let field_bytes = quote! {
        0usize #(+ <#field_types as ::typekit::ValueKind>::FIELD_BYTES)*
    };
    let padding_message = format!("`{name}` contains padding and cannot derive ValueKind");

    Ok(quote! {
        const _: () = {
            assert!(::core::mem::size_of::<#name>() == #field_bytes, #padding_message);
        };

        // SAFETY: every field is a `ValueKind` and the assertion above rules
        // out padding, so all bytes are initialized and all zeroes is valid.
        unsafe impl ::typekit::ValueKind for #name {
            const FIELD_BYTES: usize = #field_bytes;
        }

        impl ::typekit::Reflect for #name {
            fn resolve() -> ::typekit::Resolution<Self> {
                ::typekit::Resolution::value()
            }
        }
    })
}

/// Require a layout-stable `repr`.
pub(crate) fn check_repr(input: &DeriveInput, trait_name: &str) -> syn::Result<()> {
    let mut stable = false;

    for attr in &input.attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") || meta.path.is_ident("transparent") {
                stable = true;
            } else if meta.path.is_ident("packed") {
                stable = true;
                if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    content.parse::<syn::LitInt>()?;
                }
            } else if meta.path.is_ident("align") {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<syn::LitInt>()?;
            }
            Ok(())
        })?;
    }

    if stable {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.ident,
            format!("{trait_name} requires #[repr(C)], #[repr(transparent)] or #[repr(packed)]"),
        ))
    }
}

pub(crate) fn collect_field_types<'a>(
    input: &'a DeriveInput,
    trait_name: &str,
) -> syn::Result<Vec<&'a Type>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("{trait_name} can only be derived for structs"),
        ));
    };

    Ok(match &data.fields {
        Fields::Named(fields) => fields.named.iter().map(|field| &field.ty).collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().map(|field| &field.ty).collect(),
        Fields::Unit => Vec::new(),
    })
}
