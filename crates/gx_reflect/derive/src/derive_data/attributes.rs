//! `#[reflect(...)]` attribute parsing.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitBool, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level attributes.
///
/// Flags hold the span of the keyword so that errors point at it.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::C"`, generics excluded.
    pub type_path: Option<LitStr>,
    pub force_complex: Option<Span>,
    pub self_describing: Option<Span>,
    pub scalar: Option<Span>,
    pub list: Option<Span>,
    pub map: Option<Span>,
    /// `graph = false` turns the identity cache off for this type.
    pub graph: Option<LitBool>,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    pub auto_register: Option<Span>,
}

/// Sets a flag, rejecting duplicates.
fn set_flag(slot: &mut Option<Span>, span: Span, name: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(span, format!("duplicate `{name}` attribute")));
    }
    *slot = Some(span);
    Ok(())
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("expected an identifier"));
                };

                match ident.to_string().as_str() {
                    "type_path" => {
                        if res.type_path.is_some() {
                            return Err(meta.error("duplicate `type_path` attribute"));
                        }
                        let lit: LitStr = meta.value()?.parse()?;
                        validate_type_path(&lit)?;
                        res.type_path = Some(lit);
                    }
                    "graph" => {
                        if res.graph.is_some() {
                            return Err(meta.error("duplicate `graph` attribute"));
                        }
                        res.graph = Some(meta.value()?.parse()?);
                    }
                    "force_complex" => set_flag(&mut res.force_complex, span, "force_complex")?,
                    "self_describing" => {
                        set_flag(&mut res.self_describing, span, "self_describing")?;
                    }
                    "scalar" => set_flag(&mut res.scalar, span, "scalar")?,
                    "list" => set_flag(&mut res.list, span, "list")?,
                    "map" => set_flag(&mut res.map, span, "map")?,
                    "auto_register" => set_flag(&mut res.auto_register, span, "auto_register")?,
                    "ignore" => {
                        return Err(meta.error("`ignore` can only be applied to fields"));
                    }
                    _ => return Err(meta.error("unknown reflect attribute")),
                }
                Ok(())
            })?;
        }

        Ok(res)
    }

    /// `true` unless `graph = false` was given.
    #[inline]
    pub fn use_graph_serialization(&self) -> bool {
        self.graph.as_ref().is_none_or(LitBool::value)
    }

    /// Splits the custom path into module and ident.
    ///
    /// `"a::b::C"` gives `(Some("a::b"), "C")`, `"C"` gives `(None, "C")`.
    pub fn split_type_path(&self) -> Option<(Option<String>, String)> {
        let path = self.type_path.as_ref()?.value();
        Some(match path.rsplit_once("::") {
            Some((module, ident)) => (Some(module.to_owned()), ident.to_owned()),
            None => (None, path),
        })
    }
}

fn validate_type_path(lit: &LitStr) -> syn::Result<()> {
    let value = lit.value();
    let valid = !value.is_empty()
        && value.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        });
    if valid {
        Ok(())
    } else {
        Err(syn::Error::new(
            lit.span(),
            "`type_path` must look like `module::Ident`, without generics",
        ))
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field-level attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// The field is invisible to reflection.
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    set_flag(&mut res.ignore, meta.path.span(), "ignore")
                } else {
                    Err(meta.error("unknown field attribute, expected `ignore`"))
                }
            })?;
        }

        Ok(res)
    }
}
