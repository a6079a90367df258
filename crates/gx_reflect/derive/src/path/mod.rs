//! Paths into `gx_reflect` used by generated code, kept in one place.
//!
//! Every helper takes the crate path found by [`gx_reflect`], which is
//! resolved once per macro call.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The path under which the calling crate sees `gx_reflect`.
///
/// Looks up the caller's `Cargo.toml`: `::gx_reflect` for direct
/// dependents, `::graphxml::reflect` for crates depending on the facade.
pub(crate) fn gx_reflect() -> syn::Path {
    gx_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("gx_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;
mod registry;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;
pub(crate) use registry::*;

#[inline(always)]
pub(crate) fn generic_name_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::impls::generic_name
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::__macro_exports::auto_register
    }
}
