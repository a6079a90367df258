use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectKind, ReflectMeta};

/// Generates the `Reflect` impl, handing out the view for `kind`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, kind: ReflectKind) -> TokenStream {
    let gx_reflect_path = meta.gx_reflect_path();
    let reflect_ = crate::path::reflect_(gx_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(gx_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(gx_reflect_path);

    let view = kind.view_ident();
    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#view(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#view(self)
            }
        }
    }
}
