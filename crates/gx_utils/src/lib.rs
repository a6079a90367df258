//! Small containers shared by the graphxml crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`AddrKey`]: reference identity of a heap allocation.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod addr_key;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use addr_key::AddrKey;
pub use typeid_map::TypeIdMap;
