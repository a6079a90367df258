use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectEnum;

/// Generates the `Enum` impl of a fieldless enum.
///
/// Discriminants come from `as` casts, so explicit and implicit values
/// both work.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = &info.meta;
    let enum_ = crate::path::enum_(meta.gx_reflect_path());

    let idents: Vec<_> = info.variants.iter().map(|variant| &variant.ident).collect();
    let names: Vec<String> = idents.iter().map(|ident| ident.to_string()).collect();

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #enum_ for #real_ident #ty_generics #where_clause {
            fn discriminant(&self) -> i64 {
                match self {
                    #( Self::#idents => Self::#idents as i64, )*
                }
            }

            fn set_discriminant(&mut self, discriminant: i64) -> bool {
                #(
                    if discriminant == Self::#idents as i64 {
                        *self = Self::#idents;
                        return true;
                    }
                )*
                false
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    #( Self::#idents => #names, )*
                }
            }
        }
    }
}
