use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn type_path_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn field_info_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::FieldInfo
    }
}

#[inline(always)]
pub(crate) fn type_flags_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::TypeFlags
    }
}

#[inline(always)]
pub(crate) fn type_options_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::info::TypeOptions
    }
}
