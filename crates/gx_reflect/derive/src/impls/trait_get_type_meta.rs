use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectDerive, ReflectKind};

/// Generates the `GetTypeMeta` impl.
///
/// Inserts `TypeTraitDefault`, so the type must be `Default`. Field types
/// of complex structs are registered as dependencies.
pub(crate) fn impl_trait_get_type_meta(reflect_derive: &ReflectDerive) -> TokenStream {
    let meta = reflect_derive.meta();
    let gx_reflect_path = meta.gx_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(gx_reflect_path);
    let type_meta_ = crate::path::type_meta_(gx_reflect_path);
    let type_registry_ = crate::path::type_registry_(gx_reflect_path);
    let type_trait_default_ = crate::path::type_trait_default_(gx_reflect_path);
    let from_type_ = crate::path::from_type_(gx_reflect_path);

    let dependencies: Vec<&syn::Type> = match reflect_derive {
        ReflectDerive::Struct(info, ReflectKind::Struct) => {
            let mut types: Vec<&syn::Type> = Vec::new();
            for field in info.active_fields() {
                if !types.contains(&&field.data.ty) {
                    types.push(&field.data.ty);
                }
            }
            types
        }
        _ => Vec::new(),
    };

    let register_dependencies = if dependencies.is_empty() {
        crate::utils::empty()
    } else {
        quote! {
            fn register_dependencies(registry: &mut #type_registry_) {
                #( registry.register::<#dependencies>(); )*
            }
        }
    };

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, true);

    quote! {
        impl #impl_generics #get_type_meta_ for #real_ident #ty_generics #where_clause
            Self: ::core::default::Default,
        {
            fn get_type_meta() -> #type_meta_ {
                let mut type_meta = #type_meta_::with_capacity::<Self>(1);
                type_meta.insert_trait::<#type_trait_default_>(
                    #from_type_::<Self>::from_type()
                );
                type_meta
            }

            #register_dependencies
        }
    }
}
