//! Compile-time type descriptors.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names. The full path is what a document's
//!   `type` attribute carries.
//! - [`DynamicTypePath`]: object-safe mirror of `TypePath`.
//! - [`Type`]: a [`TypeId`](core::any::TypeId) plus the path accessors.
//! - [`TypeFlags`]: the capabilities a type declares.
//! - [`TypeOptions`]: per-type serialization options.
//! - [`Kind`] and [`classify`]: the single encode/decode strategy chosen
//!   from a type's flags.
//! - [`TypeInfo`]: everything above, plus ordered [`FieldInfo`]s for
//!   complex types and the pointee of wrapper types.
//! - [`Typed`] / [`DynamicTyped`]: access to a type's static `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod flags;
mod kind;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::FieldInfo;
pub use flags::{TypeFlags, TypeOptions};
pub use kind::{Kind, classify};
pub use type_info::TypeInfo;
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
