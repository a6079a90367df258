use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::ReflectMeta;

/// Generates the `TypePath` impl.
///
/// Non-generic types return literals. Generic types build their names
/// once per instantiation and cache them in a `GenericTypePathCell`.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let gx_reflect_path = meta.gx_reflect_path();
    let type_path_ = crate::path::type_path_(gx_reflect_path);

    let real_ident = meta.real_ident();
    let base_type_path = meta.base_type_path();
    let base_type_name = meta.base_type_name();
    let module_path = meta.module_path();

    let (type_path, type_name) = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_path_cell_(gx_reflect_path);
        let generic_name_ = crate::path::generic_name_(gx_reflect_path);

        let path_params = meta.generic_param_names(&Ident::new("type_path", Span::call_site()));
        let name_params = meta.generic_param_names(&Ident::new("type_name", Span::call_site()));

        (
            quote! {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_insert::<Self>(|| {
                    #generic_name_(#base_type_path, &[ #(#path_params),* ])
                })
            },
            quote! {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_insert::<Self>(|| {
                    #generic_name_(#base_type_name, &[ #(#name_params),* ])
                })
            },
        )
    } else {
        (base_type_path, quote! { #base_type_name })
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false, false);

    quote! {
        impl #impl_generics #type_path_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #base_type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
