use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generates the `Struct` impl.
///
/// Names are matched against storage names; indices count the reflected
/// fields only.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = &info.meta;
    let gx_reflect_path = meta.gx_reflect_path();
    let reflect_ = crate::path::reflect_(gx_reflect_path);
    let struct_ = crate::path::struct_(gx_reflect_path);

    let mut names = Vec::new();
    let mut members = Vec::new();
    let mut indices = Vec::new();
    for field in info.active_fields() {
        names.push(field.name());
        members.push(field.ident);
        indices.push(field.reflection_index.unwrap_or_default());
    }
    let field_len = names.len();

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #struct_ for #real_ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #( #names => ::core::option::Option::Some(&self.#members), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #( #names => ::core::option::Option::Some(&mut self.#members), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&self.#members), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #( #indices => ::core::option::Option::Some(&mut self.#members), )*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
