use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn get_type_meta_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::registry::GetTypeMeta
    }
}

#[inline(always)]
pub(crate) fn type_meta_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::registry::TypeMeta
    }
}

#[inline(always)]
pub(crate) fn type_registry_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::registry::TypeRegistry
    }
}

#[inline(always)]
pub(crate) fn type_trait_default_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::registry::TypeTraitDefault
    }
}

#[inline(always)]
pub(crate) fn from_type_(gx_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #gx_reflect_path::registry::FromType
    }
}
