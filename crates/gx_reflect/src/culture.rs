//! Culture-aware text forms of scalar values.
//!
//! Every document records the culture its scalars were written with in a
//! `culture` attribute on the root. Decoding parses with that same
//! culture, so a document written on a German machine reads back exactly
//! on an American one.
//!
//! Integers, enum discriminants and booleans have one form everywhere.
//! The culture decides the decimal separator of floats and decimals, and
//! the pattern of date-times.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt::Display;
use core::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;

// -----------------------------------------------------------------------------
// ScalarError

/// A scalar text form that could not be read.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScalarError {
    /// `text` is not a valid `expected` under the culture in use.
    #[error("`{text}` is not a valid {expected}")]
    Invalid { text: String, expected: &'static str },
    /// No culture is known by this tag.
    #[error("unknown culture `{0}`")]
    UnknownCulture(String),
}

impl ScalarError {
    #[inline]
    pub fn invalid(text: &str, expected: &'static str) -> Self {
        Self::Invalid {
            text: text.to_string(),
            expected,
        }
    }
}

// -----------------------------------------------------------------------------
// Culture

/// Formatting conventions of one locale.
///
/// ```
/// use chrono::NaiveDate;
/// use gx_reflect::culture::Culture;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 5, 0).unwrap();
///
/// let us = Culture::from_tag("en-US").unwrap();
/// assert_eq!(us.format_date_time(&dt), "03/09/2024 14:05:00");
///
/// let inv = Culture::invariant();
/// assert_eq!(inv.format_date_time(&dt), "2024-03-09T14:05:00");
/// assert_eq!(inv.parse_date_time("2024-03-09T14:05:00").unwrap(), dt);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Culture {
    tag: &'static str,
    decimal_separator: char,
    date_time_format: &'static str,
}

static CULTURES: [Culture; 6] = [
    Culture {
        tag: "",
        decimal_separator: '.',
        date_time_format: "%Y-%m-%dT%H:%M:%S%.f",
    },
    Culture {
        tag: "en-US",
        decimal_separator: '.',
        date_time_format: "%m/%d/%Y %H:%M:%S%.f",
    },
    Culture {
        tag: "en-GB",
        decimal_separator: '.',
        date_time_format: "%d/%m/%Y %H:%M:%S%.f",
    },
    Culture {
        tag: "de-DE",
        decimal_separator: ',',
        date_time_format: "%d.%m.%Y %H:%M:%S%.f",
    },
    Culture {
        tag: "fr-FR",
        decimal_separator: ',',
        date_time_format: "%d/%m/%Y %H:%M:%S%.f",
    },
    Culture {
        tag: "ru-RU",
        decimal_separator: ',',
        date_time_format: "%d.%m.%Y %H:%M:%S%.f",
    },
];

impl Culture {
    /// The culture-independent forms, tagged `""`.
    #[inline]
    pub fn invariant() -> &'static Culture {
        &CULTURES[0]
    }

    /// Every built-in culture, invariant first.
    #[inline]
    pub fn all() -> &'static [Culture] {
        &CULTURES
    }

    /// Looks a culture up by tag. Matching ignores case and accepts `_`
    /// for `-`; `"C"` and `"POSIX"` name the invariant culture.
    ///
    /// ```
    /// use gx_reflect::culture::Culture;
    ///
    /// assert_eq!(Culture::from_tag("de_de").unwrap().tag(), "de-DE");
    /// assert_eq!(Culture::from_tag("").unwrap(), Culture::invariant());
    /// assert!(Culture::from_tag("xx-XX").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> Result<&'static Culture, ScalarError> {
        if tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
            return Ok(Self::invariant());
        }
        CULTURES
            .iter()
            .find(|c| {
                c.tag.len() == tag.len()
                    && c.tag.bytes().zip(tag.bytes()).all(|(a, b)| {
                        a.eq_ignore_ascii_case(&b) || (a == b'-' && b == b'_')
                    })
            })
            .ok_or_else(|| ScalarError::UnknownCulture(tag.to_string()))
    }

    /// The culture of the process environment.
    ///
    /// Reads `LC_ALL`, `LC_NUMERIC` and `LANG` in that order; the first
    /// one set decides. Encoding and modifier suffixes (`.UTF-8`, `@euro`)
    /// are ignored. An unknown locale falls back to the invariant culture.
    pub fn current() -> &'static Culture {
        let Some(locale) = ["LC_ALL", "LC_NUMERIC", "LANG"]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
        else {
            return Self::invariant();
        };

        let tag = locale
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        match Self::from_tag(tag) {
            Ok(culture) => culture,
            Err(_) => {
                log::warn!("unrecognised locale `{locale}`, using the invariant culture");
                Self::invariant()
            }
        }
    }

    #[inline]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// A `chrono` format string.
    #[inline]
    pub fn date_time_format(&self) -> &'static str {
        self.date_time_format
    }

    /// Formats a number whose `Display` uses `.` as decimal separator.
    pub fn format_decimal(&self, value: impl Display) -> String {
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', self.decimal_separator.encode_utf8(&mut [0; 4]))
        }
    }

    /// Parses a number whose `FromStr` expects `.` as decimal separator.
    ///
    /// A `.` is rejected in cultures that use another separator.
    pub fn parse_decimal<T: FromStr>(
        &self,
        text: &str,
        expected: &'static str,
    ) -> Result<T, ScalarError> {
        let normalized: Cow<'_, str> = if self.decimal_separator == '.' {
            Cow::Borrowed(text)
        } else if text.contains('.') {
            return Err(ScalarError::invalid(text, expected));
        } else {
            Cow::Owned(text.replace(self.decimal_separator, "."))
        };
        normalized
            .parse()
            .map_err(|_| ScalarError::invalid(text, expected))
    }

    pub fn format_date_time(&self, value: &NaiveDateTime) -> String {
        value.format(self.date_time_format).to_string()
    }

    pub fn parse_date_time(&self, text: &str) -> Result<NaiveDateTime, ScalarError> {
        NaiveDateTime::parse_from_str(text, self.date_time_format)
            .map_err(|_| ScalarError::invalid(text, "date-time"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Culture, ScalarError};

    #[test]
    fn decimal_separator() {
        let fr = Culture::from_tag("fr-FR").unwrap();
        assert_eq!(fr.format_decimal(-0.125_f64), "-0,125");
        assert_eq!(fr.parse_decimal::<f64>("-0,125", "f64").unwrap(), -0.125);
        assert!(matches!(
            fr.parse_decimal::<f64>("0.5", "f64"),
            Err(ScalarError::Invalid { .. })
        ));

        let inv = Culture::invariant();
        assert_eq!(inv.format_decimal(1e-7_f64), "0.0000001");
        assert!(inv.parse_decimal::<f64>("0,5", "f64").is_err());
    }

    #[test]
    fn date_times_keep_fractions() {
        let dt = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 58, 123_456_789)
            .unwrap();

        for culture in Culture::all() {
            let text = culture.format_date_time(&dt);
            assert_eq!(culture.parse_date_time(&text).unwrap(), dt, "{text}");
        }

        let de = Culture::from_tag("de-DE").unwrap();
        assert_eq!(de.format_date_time(&dt), "31.12.1999 23:59:58.123456789");
    }

    #[test]
    fn tags() {
        assert_eq!(Culture::from_tag("EN-us").unwrap().tag(), "en-US");
        assert_eq!(Culture::from_tag("POSIX").unwrap(), Culture::invariant());
        assert!(matches!(
            Culture::from_tag("en"),
            Err(ScalarError::UnknownCulture(tag)) if tag == "en"
        ));
    }
}
