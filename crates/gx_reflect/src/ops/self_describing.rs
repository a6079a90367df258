use alloc::string::String;

use gx_xml::XmlError;

use crate::Reflect;

/// A type that writes and reads its own markup.
///
/// The codec wraps whatever [`write_xml`](SelfDescribing::write_xml)
/// returns in a `<value>` child and hands the inner markup of that child
/// back to [`read_xml`](SelfDescribing::read_xml). The fragment may hold
/// text, elements or both.
///
/// Opt in with `#[reflect(self_describing)]`.
pub trait SelfDescribing: Reflect {
    fn write_xml(&self) -> String;

    fn read_xml(&mut self, fragment: &str) -> Result<(), XmlError>;
}
