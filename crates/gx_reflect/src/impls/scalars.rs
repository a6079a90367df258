use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::Reflect;
use crate::culture::{Culture, ScalarError};
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeFlags, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef, Scalar};
use crate::registry::{GetTypeMeta, TypeMeta, TypeTraitDefault};

// -----------------------------------------------------------------------------
// Shared boilerplate

macro_rules! impl_scalar_type {
    ($ty:ty, $flags:expr, path = $path:expr, name = $name:expr, module = $module:expr) => {
        impl TypePath for $ty {
            fn type_path() -> &'static str {
                $path
            }

            fn type_name() -> &'static str {
                $name
            }

            fn type_ident() -> &'static str {
                $name
            }

            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::new::<Self>($flags))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Scalar(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar(self)
            }
        }

    };
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer {
    ($($ty:ident),* $(,)?) => {$(
        impl_scalar_type!(
            $ty,
            TypeFlags::SCALAR,
            path = stringify!($ty),
            name = stringify!($ty),
            module = None
        );
        impl_get_type_meta!(impl<> for $ty where);

        impl Scalar for $ty {
            #[inline]
            fn format_text(&self, _: &Culture) -> String {
                self.to_string()
            }

            fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
                *self = text
                    .parse()
                    .map_err(|_| ScalarError::invalid(text, stringify!($ty)))?;
                Ok(())
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

macro_rules! impl_float {
    ($($ty:ident),* $(,)?) => {$(
        impl_scalar_type!(
            $ty,
            TypeFlags::SCALAR,
            path = stringify!($ty),
            name = stringify!($ty),
            module = None
        );
        impl_get_type_meta!(impl<> for $ty where);

        // `Display` of floats is the shortest text that parses back to the same bits.
        impl Scalar for $ty {
            #[inline]
            fn format_text(&self, culture: &Culture) -> String {
                culture.format_decimal(self)
            }

            fn parse_text(&mut self, text: &str, culture: &Culture) -> Result<(), ScalarError> {
                *self = culture.parse_decimal(text, stringify!($ty))?;
                Ok(())
            }
        }
    )*};
}

impl_float!(f32, f64);

// -----------------------------------------------------------------------------
// bool, char, String

impl_scalar_type!(bool, TypeFlags::SCALAR, path = "bool", name = "bool", module = None);
impl_get_type_meta!(impl<> for bool where);

impl Scalar for bool {
    #[inline]
    fn format_text(&self, _: &Culture) -> String {
        self.to_string()
    }

    fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
        *self = if text.eq_ignore_ascii_case("true") {
            true
        } else if text.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(ScalarError::invalid(text, "bool"));
        };
        Ok(())
    }
}

impl_scalar_type!(char, TypeFlags::SCALAR, path = "char", name = "char", module = None);
impl_get_type_meta!(impl<> for char where);

impl Scalar for char {
    #[inline]
    fn format_text(&self, _: &Culture) -> String {
        self.to_string()
    }

    fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(ScalarError::invalid(text, "char")),
        }
    }
}

impl_scalar_type!(
    String,
    TypeFlags::SCALAR,
    path = "alloc::string::String",
    name = "String",
    module = Some("alloc::string")
);
impl_get_type_meta!(impl<> for String where);

/// Written verbatim. The text `null` is the null sentinel of the codec,
/// so a string equal to `"null"` does not survive a round trip.
impl Scalar for String {
    #[inline]
    fn format_text(&self, _: &Culture) -> String {
        self.clone()
    }

    #[inline]
    fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Date-time and fixed-point decimal

impl_scalar_type!(
    NaiveDateTime,
    TypeFlags::SCALAR,
    path = "chrono::NaiveDateTime",
    name = "NaiveDateTime",
    module = Some("chrono")
);
impl_get_type_meta!(impl<> for NaiveDateTime where);

impl Scalar for NaiveDateTime {
    #[inline]
    fn format_text(&self, culture: &Culture) -> String {
        culture.format_date_time(self)
    }

    fn parse_text(&mut self, text: &str, culture: &Culture) -> Result<(), ScalarError> {
        *self = culture.parse_date_time(text)?;
        Ok(())
    }
}

impl_scalar_type!(
    Decimal,
    TypeFlags::SCALAR,
    path = "rust_decimal::Decimal",
    name = "Decimal",
    module = Some("rust_decimal")
);
impl_get_type_meta!(impl<> for Decimal where);

// `Display` keeps the scale, so `1.50` stays `1.50`.
impl Scalar for Decimal {
    #[inline]
    fn format_text(&self, culture: &Culture) -> String {
        culture.format_decimal(self)
    }

    fn parse_text(&mut self, text: &str, culture: &Culture) -> Result<(), ScalarError> {
        *self = culture.parse_decimal(text, "decimal")?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Network addresses

// No `Default` for these; the unspecified address stands in for it.
macro_rules! impl_address_type_meta {
    ($ty:ty, $default:expr) => {
        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::with_capacity::<Self>(1);
                meta.insert_trait(TypeTraitDefault::new(|| Box::new($default)));
                meta
            }
        }
    };
}

impl_scalar_type!(
    SocketAddr,
    TypeFlags::CUSTOM_SCALAR,
    path = "core::net::SocketAddr",
    name = "SocketAddr",
    module = Some("core::net")
);
impl_address_type_meta!(SocketAddr, SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)));

/// `address:port`, IPv6 addresses in brackets.
impl Scalar for SocketAddr {
    #[inline]
    fn format_text(&self, _: &Culture) -> String {
        self.to_string()
    }

    fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
        *self = text
            .parse()
            .map_err(|_| ScalarError::invalid(text, "socket address"))?;
        Ok(())
    }
}

impl_scalar_type!(
    IpAddr,
    TypeFlags::CUSTOM_SCALAR,
    path = "core::net::IpAddr",
    name = "IpAddr",
    module = Some("core::net")
);
impl_address_type_meta!(IpAddr, IpAddr::from(Ipv4Addr::UNSPECIFIED));

impl Scalar for IpAddr {
    #[inline]
    fn format_text(&self, _: &Culture) -> String {
        self.to_string()
    }

    fn parse_text(&mut self, text: &str, _: &Culture) -> Result<(), ScalarError> {
        *self = text
            .parse()
            .map_err(|_| ScalarError::invalid(text, "ip address"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::net::SocketAddr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::culture::{Culture, ScalarError};
    use crate::info::{Kind, Typed};
    use crate::ops::Scalar;

    fn round_trip<T: Scalar + Default + PartialEq + core::fmt::Debug>(value: T) {
        round_trip_over(value, T::default);
    }

    fn round_trip_over<T: Scalar + PartialEq + core::fmt::Debug>(value: T, start: fn() -> T) {
        for culture in Culture::all() {
            let text = value.format_text(culture);
            let mut back = start();
            back.parse_text(&text, culture).unwrap();
            assert_eq!(back, value, "culture `{}`, text `{text}`", culture.tag());
        }
    }

    #[test]
    fn scalars_round_trip_in_every_culture() {
        round_trip(i8::MIN);
        round_trip(u64::MAX);
        round_trip(-42_isize);
        round_trip(0.1_f32 + 0.2_f32);
        round_trip(core::f64::consts::PI);
        round_trip(-1.0e-300_f64);
        round_trip(f64::MAX);
        round_trip(true);
        round_trip('ж');
        round_trip(String::from("a \"quoted\"\nline"));
        round_trip(
            NaiveDate::from_ymd_opt(2001, 2, 3)
                .unwrap()
                .and_hms_micro_opt(4, 5, 6, 7)
                .unwrap(),
        );
        round_trip("-12.500".parse::<Decimal>().unwrap());
    }

    #[test]
    fn socket_addresses_round_trip() {
        let unspecified = || SocketAddr::from(([0, 0, 0, 0], 0));
        round_trip_over("[::1]:8080".parse::<SocketAddr>().unwrap(), unspecified);
        round_trip_over("192.168.0.1:443".parse::<SocketAddr>().unwrap(), unspecified);
    }

    #[test]
    fn decimal_keeps_scale() {
        let de = Culture::from_tag("de-DE").unwrap();
        let d: Decimal = "1.50".parse().unwrap();
        assert_eq!(d.format_text(de), "1,50");
    }

    #[test]
    fn malformed_text() {
        let inv = Culture::invariant();
        let mut n = 0_u8;
        assert!(matches!(n.parse_text("256", inv), Err(ScalarError::Invalid { .. })));
        assert!(n.parse_text(" 1", inv).is_err());
        assert_eq!(n, 0);

        let mut c = 'x';
        assert!(c.parse_text("xy", inv).is_err());
        assert!(c.parse_text("", inv).is_err());

        let mut b = false;
        assert!(b.parse_text("yes", inv).is_err());
        b.parse_text("TRUE", inv).unwrap();
        assert!(b);
    }

    #[test]
    fn endpoints_are_custom_scalars() {
        assert_eq!(SocketAddr::type_info().kind(), Kind::Scalar);
        assert!(SocketAddr::type_info()
            .flags()
            .contains(crate::info::TypeFlags::CUSTOM_SCALAR));

        let addr: SocketAddr = "10.0.0.1:443".parse().unwrap();
        assert_eq!(addr.format_text(Culture::invariant()), "10.0.0.1:443");
    }
}
