//! Runtime type registry.
//!
//! The decoder turns the `type` attribute of a [`Dynamic`] slot back into
//! a value through this registry: the name is resolved to a [`TypeMeta`],
//! whose [`TypeTraitDefault`] builds the instance that gets decoded into.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability stored per registered type.
//! - [`FromType`]: builds a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: a [`TypeInfo`] plus a `TypeTrait` table.
//! - [`GetTypeMeta`]: builds the `TypeMeta` of a type and registers the
//!   types it depends on.
//! - [`TypeRegistry`]: the store, indexed by `TypeId`, full path and
//!   unambiguous short name.
//! - [`TypeRegistryArc`]: a shareable, lock-protected registry.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types derived with
//! `#[reflect(auto_register)]` are collected at link time through the
//! [`inventory`] crate, see [`TypeRegistry::auto_register`]. On platforms
//! `inventory` does not support, that call registers nothing and returns
//! `false`.
//!
//! [`Dynamic`]: crate::ops::Dynamic
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod default;
mod from_type;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use from_type::FromType;
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
