use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident};

use super::{FieldAttributes, ReflectMeta};

// -----------------------------------------------------------------------------
// Define

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

/// A named field of a struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
    /// Position among the reflected fields, `None` when ignored.
    pub reflection_index: Option<usize>,
}

// -----------------------------------------------------------------------------
// StructField Implementation

impl StructField<'_> {
    /// The storage name, raw prefix included.
    #[inline]
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    /// `FieldInfo::new::<T>("name", index)`.
    pub fn to_info_tokens(&self, gx_reflect_path: &syn::Path) -> TokenStream {
        let field_info_ = crate::path::field_info_(gx_reflect_path);
        let ty = &self.data.ty;
        let name = self.name();
        let index = self.reflection_index.unwrap_or_default();

        quote! {
            #field_info_::new::<#ty>(#name, #index)
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct Implementation

impl<'a> ReflectStruct<'a> {
    /// Fields visible to reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.ignore.is_none())
    }

    /// `.with_fields([...])`, or nothing for a struct without fields.
    pub fn with_fields_expression(&self) -> TokenStream {
        let gx_reflect_path = self.meta.gx_reflect_path();
        let infos: Vec<TokenStream> = self
            .active_fields()
            .map(|field| field.to_info_tokens(gx_reflect_path))
            .collect();

        if infos.is_empty() {
            return crate::utils::empty();
        }

        quote! {
            .with_fields([ #(#infos),* ])
        }
    }
}
