use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn reflect_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn reflect_ref_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn reflect_mut_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::ops::ReflectMut
    }
}

#[inline(always)]
pub(crate) fn struct_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::ops::Enum
    }
}
