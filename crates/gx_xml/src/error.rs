use core::str::Utf8Error;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors produced while reading a document or fragment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("malformed xml: {0}")]
    Reader(#[from] quick_xml::Error),
    /// An attribute could not be split into a name and a quoted value.
    #[error("malformed attribute: {0}")]
    Attr(#[from] AttrError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),
    /// An end tag with no open element.
    #[error("unexpected end tag `</{0}>`")]
    UnexpectedEnd(String),
    /// Input ended while `<{0}>` was still open.
    #[error("element `<{0}>` is never closed")]
    Unclosed(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    /// Non-whitespace text outside the root element.
    #[error("text outside of the root element")]
    StrayText,
    /// Raised by code that interprets a fragment on its own terms.
    #[error("{0}")]
    Custom(String),
}

impl XmlError {
    /// Creates an [`XmlError::Custom`] from any message.
    #[inline]
    pub fn custom(msg: impl core::fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }
}
