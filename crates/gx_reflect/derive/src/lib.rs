//! Derive macros for `gx_reflect`.
//!
//! - [`Reflect`]
//! - [`TypePath`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `GetTypeMeta` (when the type is `Default`)
/// - `Struct` (for `struct T { ... }` and `struct T;`)
/// - `Enum` (for fieldless `enum T { ... }`)
///
/// Tuple structs and enums with payloads are rejected.
///
/// ## Kinds
///
/// A struct is complex by default: it is written field by field, in
/// declaration order. These type-level flags select another encoding;
/// the type then implements the matching trait itself:
///
/// | attribute | trait to implement |
/// |---|---|
/// | `scalar` | `ops::Scalar` |
/// | `self_describing` | `ops::SelfDescribing` |
/// | `list` | `ops::List` |
/// | `map` | `ops::Map` |
///
/// `scalar` marks a custom scalar and wins over every other flag.
/// `force_complex` keeps the field encoding when any of the remaining
/// flags is present. Otherwise `self_describing` wins over `map`, and
/// `map` over `list`.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(self_describing)]
/// struct Csv { rows: Vec<String> }
///
/// impl SelfDescribing for Csv { /* ... */ }
/// ```
///
/// An enum must be fieldless. It is written as its discriminant, so
/// renaming variants keeps old documents readable.
///
/// ## Graph Mode
///
/// `#[reflect(graph = false)]` turns the identity cache off for shared
/// instances of the type.
///
/// ## Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "shop::Order")]
/// struct Order { /* ... */ }
/// ```
///
/// The path excludes generics; they are appended automatically.
///
/// ## Auto Registration
///
/// `#[reflect(auto_register)]` submits the type to the link-time
/// registry. It is a no-op without the `auto_register` feature and for
/// generic types.
///
/// ## ignore
///
/// `#[reflect(ignore)]` on a field removes it from the type info and
/// from every `Struct` accessor. The field keeps its `Default` value
/// when decoded.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast).into()
}

/// # Derive TypePath Trait
///
/// Implements `TypePath` only. Accepts the same attributes as
/// [`derive Reflect`](derive_reflect) and ignores all but `type_path`.
///
/// ```rust, ignore
/// #[derive(TypePath)]
/// struct A;
///
/// #[derive(TypePath)]
/// #[reflect(type_path = "crate_name::foo::B")]
/// struct B<T>(T);
/// ```
#[proc_macro_derive(TypePath, attributes(reflect))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, TypeAttributes};

    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let attrs = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let meta = ReflectMeta::new(&ast.ident, &ast.generics, attrs);
    let type_path_impls = impls::impl_trait_type_path(&meta);

    TokenStream::from(quote::quote! {
        const _: () = {
            #type_path_impls
        };
    })
}

/// Adds a concrete type to the link-time registry.
///
/// Does nothing without the `auto_register` feature.
///
/// ```ignore
/// impl_auto_register!(foo::Foo);
/// impl_auto_register!(Vec<u32>);
/// ```
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let ty = parse_macro_input!(_input as syn::Type);

        let gx_reflect_path = path::gx_reflect();
        let auto_register_ = path::auto_register_(&gx_reflect_path);

        TokenStream::from(quote::quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#ty as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
