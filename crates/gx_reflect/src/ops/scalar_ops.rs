use alloc::string::String;

use crate::Reflect;
use crate::culture::{Culture, ScalarError};

/// A value written as the text of a `value` attribute.
///
/// Both directions take the document's [`Culture`], which decides the
/// decimal separator and the date-time pattern.
///
/// ```
/// use gx_reflect::culture::Culture;
/// use gx_reflect::ops::Scalar;
///
/// let de = Culture::from_tag("de-DE").unwrap();
/// assert_eq!(1.5_f64.format_text(de), "1,5");
///
/// let mut x = 0.0_f64;
/// x.parse_text("2,25", de).unwrap();
/// assert_eq!(x, 2.25);
/// ```
pub trait Scalar: Reflect {
    fn format_text(&self, culture: &Culture) -> String;

    fn parse_text(&mut self, text: &str, culture: &Culture) -> Result<(), ScalarError>;
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::Scalar;
    use crate::codec::{Decoder, Encoder};
    use crate::culture::{Culture, ScalarError};
    use crate::derive::Reflect;
    use crate::info::{Kind, TypeFlags, Typed};
    use crate::ops::ReflectRef;
    use crate::registry::TypeRegistry;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(scalar, force_complex)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    impl Scalar for Endpoint {
        fn format_text(&self, _: &Culture) -> String {
            format!("{}:{}", self.host, self.port)
        }

        fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
            let (host, port) = text
                .rsplit_once(':')
                .ok_or_else(|| ScalarError::invalid(text, "host:port"))?;
            self.port = port
                .parse()
                .map_err(|_| ScalarError::invalid(text, "host:port"))?;
            self.host = String::from(host);
            Ok(())
        }
    }

    #[test]
    fn derived_scalar_wins_over_force_complex() {
        let info = Endpoint::type_info();
        assert!(info.flags().contains(TypeFlags::CUSTOM_SCALAR | TypeFlags::FORCE_COMPLEX));
        assert!(!info.flags().contains(TypeFlags::SCALAR));
        assert_eq!(info.kind(), Kind::Scalar);

        let value = Endpoint {
            host: String::from("db"),
            port: 5432,
        };
        assert!(matches!(crate::Reflect::reflect_ref(&value), ReflectRef::Scalar(_)));

        let doc = Encoder::new()
            .with_culture(Culture::invariant())
            .serialize(&value, "Endpoint")
            .unwrap();
        assert_eq!(doc.root().attribute("value"), Some("db:5432"));
        assert_eq!(doc.root().child_count(), 0);

        let registry = TypeRegistry::new();
        let back: Endpoint = Decoder::new(&registry).deserialize(&doc).unwrap();
        assert_eq!(back, value);
    }
}
