use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

// -----------------------------------------------------------------------------
// ReflectMeta

/// What every generated impl needs to know about the input type.
pub(crate) struct ReflectMeta<'a> {
    gx_reflect_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
    /// Types of the reflected fields, deduplicated.
    active_types: Vec<Type>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("gx_reflect_path", &self.gx_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(ident: &'a Ident, generics: &'a Generics, attrs: TypeAttributes) -> Self {
        Self {
            gx_reflect_path: crate::path::gx_reflect(),
            ident,
            generics,
            attrs,
            active_types: Vec::new(),
        }
    }

    /// Records the field types that need trait bounds on generic impls.
    pub(super) fn set_active_types(&mut self, types: impl IntoIterator<Item = Type>) {
        for ty in types {
            if !self.active_types.contains(&ty) {
                self.active_types.push(ty);
            }
        }
    }

    #[inline]
    pub fn gx_reflect_path(&self) -> &Path {
        &self.gx_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn real_ident(&self) -> &'a Ident {
        self.ident
    }

    /// Whether the type path depends on generic parameters.
    ///
    /// Lifetimes do not count: they are not part of the path.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
            || self.generics.const_params().next().is_some()
    }

    // -------------------------------------------------------------------------
    // Names

    /// The ident as written in paths, without the `r#` prefix.
    fn ident_string(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// `&'static str` expression of the path without generics.
    pub fn base_type_path(&self) -> TokenStream {
        match self.attrs.type_path.as_ref() {
            Some(lit) => lit.to_token_stream(),
            None => {
                let ident = self.ident_string();
                quote! {
                    ::core::concat!(::core::module_path!(), "::", #ident)
                }
            }
        }
    }

    /// The short name without generics.
    pub fn base_type_name(&self) -> String {
        match self.attrs.split_type_path() {
            Some((_, ident)) => ident,
            None => self.ident_string(),
        }
    }

    /// `Option<&'static str>` expression of the module.
    pub fn module_path(&self) -> TokenStream {
        match self.attrs.split_type_path() {
            Some((Some(module), _)) => quote! { ::core::option::Option::Some(#module) },
            Some((None, _)) => quote! { ::core::option::Option::None },
            None => quote! { ::core::option::Option::Some(::core::module_path!()) },
        }
    }

    /// One `&str` expression per generic parameter, calling `method` of
    /// `TypePath` on type parameters and formatting const parameters.
    pub fn generic_param_names(&self, method: &Ident) -> Vec<TokenStream> {
        let type_path_ = crate::path::type_path_(&self.gx_reflect_path);
        let gx_reflect_path = &self.gx_reflect_path;

        self.generics
            .params
            .iter()
            .filter_map(|param| match param {
                syn::GenericParam::Lifetime(_) => None,
                syn::GenericParam::Type(type_param) => {
                    let ident = &type_param.ident;
                    Some(quote! { <#ident as #type_path_>::#method() })
                }
                syn::GenericParam::Const(const_param) => {
                    let ident = &const_param.ident;
                    Some(quote! {
                        &#gx_reflect_path::__macro_exports::ToString::to_string(&#ident)
                    })
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Returns `impl_generics`, `ty_generics` and a full where clause.
    ///
    /// ```ignore
    /// let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, false);
    ///
    /// quote! {
    ///     impl #impl_generics TraitName for #real_ident #ty_generics #where_clause {
    ///         /* ... */
    ///     }
    /// }
    /// ```
    ///
    /// The where clause keeps the user's predicates and adds:
    ///
    /// - `Self: 'static` when the type has lifetime parameters;
    /// - `T: TypePath` for every type parameter;
    /// - `Reflect + Typed` for field types mentioning a type parameter,
    ///   when `add_reflect_typed`;
    /// - `GetTypeMeta` on those same field types, when `add_get_type_meta`.
    pub fn split_generics(
        &self,
        add_reflect_typed: bool,
        add_get_type_meta: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let generics = self.generics;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let mut generic_where_clause = quote! { where };

        if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let type_path_ = crate::path::type_path_(&self.gx_reflect_path);
        for param in generics.type_params() {
            let ident = &param.ident;
            generic_where_clause.extend(quote! { #ident: #type_path_, });
        }

        if add_reflect_typed {
            generic_where_clause.extend(self.field_type_predicates(add_get_type_meta));
        }

        (impl_generics, ty_generics, generic_where_clause)
    }

    fn field_type_predicates(&self, add_get_type_meta: bool) -> TokenStream {
        let params: Vec<&Ident> = self.generics.type_params().map(|p| &p.ident).collect();
        if params.is_empty() {
            return crate::utils::empty();
        }

        let reflect_ = crate::path::reflect_(&self.gx_reflect_path);
        let typed_ = crate::path::typed_(&self.gx_reflect_path);
        let get_type_meta_ = if add_get_type_meta {
            let get_type_meta_ = crate::path::get_type_meta_(&self.gx_reflect_path);
            quote!( + #get_type_meta_ )
        } else {
            crate::utils::empty()
        };

        let predicates = self
            .active_types
            .iter()
            .filter(|ty| mentions_any(&params, ty.to_token_stream()))
            .map(|ty| quote! { #ty: #reflect_ + #typed_ #get_type_meta_, });

        quote! { #(#predicates)* }
    }
}

/// Does any of `idents` appear in `tokens`?
fn mentions_any(idents: &[&Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&&ident),
        proc_macro2::TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
