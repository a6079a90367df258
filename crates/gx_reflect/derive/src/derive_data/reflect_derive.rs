use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident};

use super::{FieldAttributes, ReflectEnum, ReflectMeta, ReflectStruct, StructField, TypeAttributes};

// -----------------------------------------------------------------------------
// ReflectKind

/// The capability view a derived type hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReflectKind {
    /// Field by field, the `Struct` impl is generated.
    Struct,
    /// The `Enum` impl is generated.
    Enum,
    // The user implements the matching trait.
    SelfDescribing,
    Scalar,
    List,
    Map,
}

impl ReflectKind {
    /// Variant name in `ReflectRef` and `ReflectMut`.
    pub fn view_ident(self) -> Ident {
        let name = match self {
            Self::Struct => "Struct",
            Self::Enum => "Enum",
            Self::SelfDescribing => "SelfDescribing",
            Self::Scalar => "Scalar",
            Self::List => "List",
            Self::Map => "Map",
        };
        Ident::new(name, Span::call_site())
    }

    /// Picks the view for a struct. Mirrors `info::classify`.
    fn of_struct(attrs: &TypeAttributes) -> Self {
        if attrs.scalar.is_some() {
            Self::Scalar
        } else if attrs.force_complex.is_some() {
            Self::Struct
        } else if attrs.self_describing.is_some() {
            Self::SelfDescribing
        } else if attrs.map.is_some() {
            Self::Map
        } else if attrs.list.is_some() {
            Self::List
        } else {
            Self::Struct
        }
    }

    /// Picks the view for an enum.
    fn of_enum(attrs: &TypeAttributes) -> syn::Result<Self> {
        let unsupported = [
            (attrs.force_complex, "force_complex"),
            (attrs.scalar, "scalar"),
            (attrs.list, "list"),
            (attrs.map, "map"),
        ];
        for (span, name) in unsupported {
            if let Some(span) = span {
                return Err(syn::Error::new(
                    span,
                    format!("`{name}` is not supported on enums"),
                ));
            }
        }

        if attrs.self_describing.is_some() {
            Ok(Self::SelfDescribing)
        } else {
            Ok(Self::Enum)
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectDerive

pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>, ReflectKind),
    Enum(ReflectEnum<'a>, ReflectKind),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let kind = ReflectKind::of_struct(&attrs);
                let mut meta = ReflectMeta::new(&input.ident, &input.generics, attrs);

                let named: Vec<&syn::Field> = match &data.fields {
                    Fields::Named(fields) => fields.named.iter().collect(),
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(_) => {
                        return Err(syn::Error::new_spanned(
                            &data.fields,
                            "tuple structs cannot derive `Reflect`, use named fields",
                        ));
                    }
                };

                let mut fields = Vec::with_capacity(named.len());
                let mut next_index = 0;
                for field in named {
                    let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                    let reflection_index = if attrs.ignore.is_none() {
                        next_index += 1;
                        Some(next_index - 1)
                    } else {
                        None
                    };
                    let Some(ident) = field.ident.as_ref() else {
                        return Err(syn::Error::new_spanned(field, "expected a named field"));
                    };
                    fields.push(StructField {
                        data: field,
                        ident,
                        attrs,
                        reflection_index,
                    });
                }

                if kind == ReflectKind::Struct {
                    meta.set_active_types(
                        fields
                            .iter()
                            .filter(|field| field.attrs.ignore.is_none())
                            .map(|field| field.data.ty.clone()),
                    );
                }

                Ok(Self::Struct(ReflectStruct { meta, fields }, kind))
            }
            Data::Enum(data) => {
                let kind = ReflectKind::of_enum(&attrs)?;
                let meta = ReflectMeta::new(&input.ident, &input.generics, attrs);

                if data.variants.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "enums without variants cannot derive `Reflect`",
                    ));
                }

                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new_spanned(
                            variant,
                            "only fieldless enums can derive `Reflect`",
                        ));
                    }
                    if let Some(attr) = variant
                        .attrs
                        .iter()
                        .find(|attr| attr.path().is_ident(crate::REFLECT_ATTRIBUTE_NAME))
                    {
                        return Err(syn::Error::new_spanned(
                            attr,
                            "reflect attributes are not supported on variants",
                        ));
                    }
                    variants.push(variant);
                }

                Ok(Self::Enum(ReflectEnum { meta, variants }, kind))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "unions cannot derive `Reflect`",
            )),
        }
    }

    pub fn meta(&self) -> &ReflectMeta<'a> {
        match self {
            Self::Struct(data, _) => &data.meta,
            Self::Enum(data, _) => &data.meta,
        }
    }

    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_, kind) | Self::Enum(_, kind) => *kind,
        }
    }

    /// `TypeFlags` expression for the type info.
    pub fn flags_tokens(&self) -> proc_macro2::TokenStream {
        let meta = self.meta();
        let flags_ = crate::path::type_flags_(meta.gx_reflect_path());
        let attrs = meta.attrs();

        let mut flags = Vec::new();
        let declared = [
            (attrs.force_complex.is_some(), "FORCE_COMPLEX"),
            (attrs.self_describing.is_some(), "SELF_DESCRIBING"),
            (matches!(self, Self::Enum(..)), "ENUM"),
            (attrs.scalar.is_some(), "CUSTOM_SCALAR"),
            (attrs.map.is_some(), "MAP"),
            (attrs.list.is_some(), "LIST"),
        ];
        for (set, name) in declared {
            if set {
                let ident = Ident::new(name, Span::call_site());
                flags.push(quote! { #flags_::#ident });
            }
        }

        if flags.is_empty() {
            quote! { #flags_::empty() }
        } else {
            quote! { #(#flags)|* }
        }
    }
}
