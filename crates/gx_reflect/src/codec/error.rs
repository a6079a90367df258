use alloc::string::String;

use gx_xml::XmlError;
use thiserror::Error;

use crate::culture::ScalarError;

/// Failure of a whole encode or decode call.
///
/// There is no partial result: the first error aborts the call. Missing
/// and unknown fields are never errors, see [`Decoder`](super::Decoder).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// An element needs a concrete type and none could be found.
    ///
    /// `type_name` is `None` when the element carries no `type` attribute.
    #[error("cannot resolve the type of `<{element}>`{}", fmt_type_name(.type_name))]
    UnresolvableType {
        element: String,
        type_name: Option<String>,
    },
    /// A `value` attribute does not parse as the target scalar.
    #[error("malformed value in `<{element}>`: {source}")]
    MalformedScalar {
        element: String,
        #[source]
        source: ScalarError,
    },
    /// The element does not have the shape its target needs.
    #[error("structural mismatch in `<{element}>`: {reason}")]
    StructuralMismatch { element: String, reason: String },
    /// The root `culture` attribute names no known culture.
    #[error("unknown culture `{0}`")]
    UnknownCulture(String),
    /// The root element name is not a valid XML name.
    #[error("`{0}` is not a valid element name")]
    InvalidName(String),
    /// A `RefCell` pointee was already borrowed in a conflicting way.
    #[error("shared value in `<{0}>` is borrowed elsewhere")]
    SharedBorrowed(String),
    #[error(transparent)]
    Xml(#[from] XmlError),
}

fn fmt_type_name(type_name: &Option<String>) -> String {
    match type_name {
        Some(name) => alloc::format!(" (`{name}` is not registered)"),
        None => String::from(" (no `type` attribute)"),
    }
}

impl CodecError {
    #[inline]
    pub(crate) fn unresolvable(element: &str, type_name: Option<&str>) -> Self {
        Self::UnresolvableType {
            element: element.into(),
            type_name: type_name.map(Into::into),
        }
    }

    #[inline]
    pub(crate) fn malformed(element: &str, source: ScalarError) -> Self {
        Self::MalformedScalar {
            element: element.into(),
            source,
        }
    }

    #[inline]
    pub(crate) fn mismatch(element: &str, reason: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::CodecError;
    use crate::culture::ScalarError;

    #[test]
    fn messages() {
        let err = CodecError::unresolvable("item", Some("app::Gone"));
        assert_eq!(
            err.to_string(),
            "cannot resolve the type of `<item>` (`app::Gone` is not registered)"
        );
        assert_eq!(
            CodecError::unresolvable("item", None).to_string(),
            "cannot resolve the type of `<item>` (no `type` attribute)"
        );

        let err = CodecError::malformed("age", ScalarError::invalid("x", "i32"));
        assert_eq!(err.to_string(), "malformed value in `<age>`: `x` is not a valid i32");
        assert!(core::error::Error::source(&err).is_some());

        let err = CodecError::InvalidName("my root".to_string());
        assert_eq!(err.to_string(), "`my root` is not a valid element name");
    }
}
