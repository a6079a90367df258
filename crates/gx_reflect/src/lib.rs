#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code refers to `::gx_reflect`, including inside this crate's own tests.
extern crate self as gx_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod codec;
pub mod culture;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use codec::{deserialize, from_xml_str, serialize, to_xml_string};
pub use reflection::Reflect;
pub use gx_reflect_derive as derive;
