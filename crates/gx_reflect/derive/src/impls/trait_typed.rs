use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generates the `Typed` impl.
///
/// `flags` is a `TypeFlags` expression, `with_fields` an optional
/// `.with_fields(..)` call.
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    flags: TokenStream,
    with_fields: TokenStream,
) -> TokenStream {
    let gx_reflect_path = meta.gx_reflect_path();
    let typed_ = crate::path::typed_(gx_reflect_path);
    let type_info_ = crate::path::type_info_(gx_reflect_path);

    let with_options = if meta.attrs().use_graph_serialization() {
        crate::utils::empty()
    } else {
        let type_options_ = crate::path::type_options_(gx_reflect_path);
        quote! { .with_options(#type_options_::TREE) }
    };

    let info = quote! {
        #type_info_::new::<Self>(#flags)
            #with_options
            #with_fields
    };

    let body = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_info_cell_(gx_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #info)
        }
    } else {
        let cell_ = crate::path::non_generic_type_info_cell_(gx_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #info)
        }
    };

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #typed_ for #real_ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #body
            }
        }
    }
}
