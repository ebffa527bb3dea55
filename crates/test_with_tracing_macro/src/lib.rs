// Copyright (C) Microsoft Corporation. All rights reserved.

//! Proc macro for the `#[test]` attribute of `test_with_tracing`.
//!
//! The attribute expands to a standard `#[test]` whose body first installs
//! the tracing subscriber, so every event emitted while the test runs is
//! written to the test's captured output.
//!
//! ```ignore
//! use test_with_tracing::test;
//!
//! #[test]
//! fn test_roundtrip() {
//!     tracing::debug!("visible with --nocapture");
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::ItemFn;

/// Marks a function as a test with tracing enabled.
///
/// Other attributes such as `#[should_panic]` or `#[ignore]` are kept, and
/// tests may return a `Result`.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new(attr.span(), "#[test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    if let Some(asyncness) = sig.asyncness {
        return syn::Error::new(asyncness.span(), "async tests are not supported")
            .to_compile_error()
            .into();
    }

    let stmts = &block.stmts;
    quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis #sig {
            ::test_with_tracing::init();
            #(#stmts)*
        }
    }
    .into()
}
