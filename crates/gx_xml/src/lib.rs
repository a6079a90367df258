//! A small in-memory XML tree.
//!
//! The codec needs very little from a document model: named elements,
//! ordered attributes, ordered children and the ability to embed a raw
//! fragment produced by someone else. This crate provides exactly that on
//! top of the `quick-xml` pull reader.
//!
//! ```
//! use gx_xml::{Document, Element};
//!
//! let mut root = Element::new("Person");
//! root.set_attribute("value", "42");
//! let doc = Document::new(root);
//!
//! let text = doc.to_xml_string();
//! assert_eq!(text, r#"<Person value="42"/>"#);
//!
//! let back = Document::parse(&text).unwrap();
//! assert_eq!(back.root().attribute("value"), Some("42"));
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod document;
mod element;
mod error;
mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use document::Document;
pub use element::{Element, Node, is_name};
pub use error::XmlError;
