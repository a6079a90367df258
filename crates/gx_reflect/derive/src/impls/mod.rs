// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod struct_kind;
mod trait_get_type_meta;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;
pub(crate) use trait_get_type_meta::impl_trait_get_type_meta;
pub(crate) use trait_reflect::impl_trait_reflect;
pub(crate) use trait_type_path::impl_trait_type_path;
pub(crate) use trait_typed::impl_trait_typed;

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::{ReflectDerive, ReflectKind};

/// Expands `#[derive(Reflect)]`.
pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    let reflect_derive = match ReflectDerive::from_input(&ast) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error(),
    };

    let meta = reflect_derive.meta();
    let kind = reflect_derive.kind();

    let fields_expression = match &reflect_derive {
        ReflectDerive::Struct(info, ReflectKind::Struct) => info.with_fields_expression(),
        _ => crate::utils::empty(),
    };

    let type_path_impl = impl_trait_type_path(meta);
    let typed_impl = impl_trait_typed(meta, reflect_derive.flags_tokens(), fields_expression);
    let reflect_impl = impl_trait_reflect(meta, kind);
    let get_type_meta_impl = impl_trait_get_type_meta(&reflect_derive);
    let auto_register_impl = get_auto_register_impl(meta);

    let kind_impl = match &reflect_derive {
        ReflectDerive::Struct(info, ReflectKind::Struct) => impl_struct(info),
        ReflectDerive::Enum(info, _) => impl_enum(info),
        ReflectDerive::Struct(..) => crate::utils::empty(),
    };

    quote! {
        const _: () = {
            #type_path_impl

            #typed_impl

            #reflect_impl

            #kind_impl

            #get_type_meta_impl

            #auto_register_impl
        };
    }
}
