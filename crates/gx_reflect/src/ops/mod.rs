//! Capability views over reflected values.
//!
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) hands out one of
//! these per value, selected by the type's [`Kind`](crate::info::Kind):
//!
//! | kind | view |
//! |---|---|
//! | `Scalar` | [`Scalar`] |
//! | `SelfDescribing` | [`SelfDescribing`] |
//! | `Enum` | [`Enum`] |
//! | `Array` | [`Array`] |
//! | `Pair` | [`Pair`] |
//! | `Map` | [`Map`] |
//! | `List` | [`List`] |
//! | `Complex` | [`Struct`] |
//! | `Nullable` | [`Nullable`] |
//! | `Shared` | [`Shared`] |
//! | `Dynamic` | [`Dynamic`] |

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod dynamic;
mod enum_ops;
mod list_ops;
mod map_ops;
mod nullable_ops;
mod pair_ops;
mod scalar_ops;
mod self_describing;
mod shared_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::Array;
pub use dynamic::Dynamic;
pub use enum_ops::Enum;
pub use list_ops::List;
pub use map_ops::Map;
pub use nullable_ops::Nullable;
pub use pair_ops::Pair;
pub use scalar_ops::Scalar;
pub use self_describing::SelfDescribing;
pub use shared_ops::Shared;
pub use struct_ops::Struct;

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

/// Shared view of a value, one variant per [`Kind`](crate::info::Kind).
pub enum ReflectRef<'a> {
    Scalar(&'a dyn Scalar),
    SelfDescribing(&'a dyn SelfDescribing),
    Enum(&'a dyn Enum),
    Array(&'a dyn Array),
    Pair(&'a dyn Pair),
    Map(&'a dyn Map),
    List(&'a dyn List),
    Struct(&'a dyn Struct),
    Nullable(&'a dyn Nullable),
    Shared(&'a dyn Shared),
    Dynamic(&'a Dynamic),
}

/// Mutable view of a value, one variant per [`Kind`](crate::info::Kind).
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Scalar),
    SelfDescribing(&'a mut dyn SelfDescribing),
    Enum(&'a mut dyn Enum),
    Array(&'a mut dyn Array),
    Pair(&'a mut dyn Pair),
    Map(&'a mut dyn Map),
    List(&'a mut dyn List),
    Struct(&'a mut dyn Struct),
    Nullable(&'a mut dyn Nullable),
    Shared(&'a mut dyn Shared),
    Dynamic(&'a mut Dynamic),
}

macro_rules! impl_view_name {
    ($ty:ident) => {
        impl $ty<'_> {
            /// Name of the view, for diagnostics.
            pub const fn view_name(&self) -> &'static str {
                match self {
                    Self::Scalar(_) => "scalar",
                    Self::SelfDescribing(_) => "self-describing",
                    Self::Enum(_) => "enum",
                    Self::Array(_) => "array",
                    Self::Pair(_) => "pair",
                    Self::Map(_) => "map",
                    Self::List(_) => "list",
                    Self::Struct(_) => "struct",
                    Self::Nullable(_) => "nullable",
                    Self::Shared(_) => "shared",
                    Self::Dynamic(_) => "dynamic",
                }
            }
        }
    };
}

impl_view_name!(ReflectRef);
impl_view_name!(ReflectMut);
