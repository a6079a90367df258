//! Object graphs to XML documents and back.
//!
//! Each value becomes one element. What goes inside is decided by the
//! value's [`Kind`](crate::info::Kind):
//!
//! | kind | element |
//! |---|---|
//! | scalar | `value="<text>"`, formatted in the document culture |
//! | enum | `value="<discriminant>"` |
//! | self-describing | a `<value>` child holding the type's own markup |
//! | array, list | one child per item, each named like the parent |
//! | map | one child per entry, each with `key` and `value` children |
//! | pair | `key` and `value` children |
//! | struct | one child per field, named by the field |
//!
//! `value="null"` marks `None` and an empty [`Dynamic`](crate::ops::Dynamic).
//! A `Dynamic` also writes the held value's type path in a `type`
//! attribute. The root carries the `culture` the scalars were written in,
//! and a `type` attribute naming the root type.
//!
//! # Graph mode
//!
//! With graph mode on (the default), a shared instance (`Rc`, `Arc`,
//! `Rc<RefCell>`) reached more than once is written in full only the first
//! time. Later occurrences are empty elements carrying the same `id`, and
//! decoding hands every one of them the same handle. A cell may even
//! contain itself:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use gx_reflect::derive::Reflect;
//! use gx_reflect::registry::TypeRegistry;
//!
//! #[derive(Reflect, Default)]
//! struct Node {
//!     label: String,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//!
//! let node = Rc::new(RefCell::new(Node { label: "loop".into(), next: None }));
//! node.borrow_mut().next = Some(Rc::clone(&node));
//!
//! let xml = gx_reflect::to_xml_string(&node, "Node").unwrap();
//! # node.borrow_mut().next = None;
//!
//! let registry = TypeRegistry::new();
//! let back: Rc<RefCell<Node>> = gx_reflect::from_xml_str(&xml, &registry).unwrap();
//! let next = back.borrow().next.clone().unwrap();
//! assert!(Rc::ptr_eq(&back, &next));
//! assert_eq!(next.borrow().label, "loop");
//! # back.borrow_mut().next = None;
//! ```
//!
//! `#[reflect(graph = false)]` on the root type, or
//! [`Encoder::with_options`], turns the identity cache off for the whole
//! call; on any other type it turns it off for instances of that type.
//! Without it repeated instances are written out each time, and a cycle
//! recurses until the stack runs out.

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod error;
mod identity;
mod options;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::CodecError;
pub use identity::{IdentityCache, SharedOccurrence};
pub use options::SerializeOptions;

// -----------------------------------------------------------------------------
// Shortcuts

use alloc::string::String;

use gx_xml::Document;

use crate::Reflect;
use crate::registry::TypeRegistry;

/// Encodes `value` with a default [`Encoder`].
#[inline]
pub fn serialize(value: &dyn Reflect, root_name: &str) -> Result<Document, CodecError> {
    Encoder::new().serialize(value, root_name)
}

/// Encodes `value` with a default [`Encoder`] and renders the document.
///
/// ```
/// let xml = gx_reflect::to_xml_string(&vec![1_i32, 2, 3], "Numbers").unwrap();
/// assert!(xml.starts_with(r#"<Numbers culture=""#));
/// assert!(xml.contains(r#"<Numbers value="2"/>"#));
/// ```
#[inline]
pub fn to_xml_string(value: &dyn Reflect, root_name: &str) -> Result<String, CodecError> {
    Ok(serialize(value, root_name)?.to_xml_string())
}

/// Decodes a document into a `T`.
#[inline]
pub fn deserialize<T: Reflect + Default>(
    document: &Document,
    registry: &TypeRegistry,
) -> Result<T, CodecError> {
    Decoder::new(registry).deserialize(document)
}

/// Parses and decodes a document into a `T`.
///
/// ```
/// use gx_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let age: i32 = gx_reflect::from_xml_str(r#"<Person value="42"/>"#, &registry).unwrap();
/// assert_eq!(age, 42);
/// ```
pub fn from_xml_str<T: Reflect + Default>(
    text: &str,
    registry: &TypeRegistry,
) -> Result<T, CodecError> {
    let document: Document = text.parse()?;
    deserialize(&document, registry)
}
