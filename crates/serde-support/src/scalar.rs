use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A parsed XSD simple-type value.
///
/// Code-list values travel as [`Scalar::Text`]; the code list itself is
/// enforced by the field descriptor, not by the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(XsDateTime),
    GYearMonth(GYearMonth),
    GYear(GYear),
}

impl Scalar {
    /// Short name of the XSD type this value carries, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Text(_) => "string",
            Scalar::Integer(_) => "integer",
            Scalar::Decimal(_) => "decimal",
            Scalar::Boolean(_) => "boolean",
            Scalar::Date(_) => "date",
            Scalar::DateTime(_) => "dateTime",
            Scalar::GYearMonth(_) => "gYearMonth",
            Scalar::GYear(_) => "gYear",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Decimal(d) => write!(f, "{}", d),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Scalar::DateTime(dt) => write!(f, "{}", dt),
            Scalar::GYearMonth(ym) => write!(f, "{}", ym),
            Scalar::GYear(y) => write!(f, "{}", y),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Decimal(d) => Serialize::serialize(d, serializer),
            other => serializer.collect_str(other),
        }
    }
}

/// `xs:dateTime`, with or without a timezone designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsDateTime {
    pub value: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl XsDateTime {
    pub fn naive(value: NaiveDateTime) -> Self {
        Self {
            value,
            offset: None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self {
                value: dt.naive_local(),
                offset: Some(*dt.offset()),
            });
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(Self::naive)
    }
}

impl fmt::Display for XsDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        match self.offset {
            None => Ok(()),
            Some(offset) if offset.local_minus_utc() == 0 => f.write_str("Z"),
            Some(offset) => write!(f, "{}", offset),
        }
    }
}

impl Serialize for XsDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `xs:gYearMonth`, e.g. `1984-05`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GYearMonth {
    pub year: i32,
    pub month: u32,
}

impl GYearMonth {
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        // Reuse chrono's calendar check rather than hand-rolling a range test.
        NaiveDate::from_ymd_opt(year, month, 1).map(|d| Self {
            year: d.year(),
            month: d.month(),
        })
    }
}

impl fmt::Display for GYearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for GYearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `xs:gYear`, e.g. `1984`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GYear(pub i32);

impl GYear {
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 4 {
            return None;
        }
        s.parse().ok().map(GYear)
    }
}

impl fmt::Display for GYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl Serialize for GYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

/// A scalar could not be converted into the requested Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarError {
    pub expected: &'static str,
    pub found: String,
}

impl ScalarError {
    pub fn new(expected: &'static str, found: &Scalar) -> Self {
        Self {
            expected,
            found: format!("{} '{}'", found.type_name(), found),
        }
    }
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl std::error::Error for ScalarError {}

/// Conversion between a typed record field and its [`Scalar`] form.
pub trait ScalarValue: Sized {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError>;
    fn to_scalar(&self) -> Scalar;
}

impl ScalarValue for String {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Text(s) => Ok(s),
            other => Err(ScalarError::new("string", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Text(self.clone())
    }
}

impl ScalarValue for bool {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Boolean(b) => Ok(b),
            other => Err(ScalarError::new("boolean", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Boolean(*self)
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),*) => {
        $(
            impl ScalarValue for $ty {
                fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
                    match scalar {
                        Scalar::Integer(i) => <$ty>::try_from(i)
                            .map_err(|_| ScalarError::new(stringify!($ty), &Scalar::Integer(i))),
                        other => Err(ScalarError::new(stringify!($ty), &other)),
                    }
                }

                fn to_scalar(&self) -> Scalar {
                    Scalar::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, u8, u16, u32);

impl ScalarValue for Decimal {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Decimal(d) => Ok(d),
            Scalar::Integer(i) => Ok(Decimal::from(i)),
            other => Err(ScalarError::new("decimal", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Decimal(*self)
    }
}

impl ScalarValue for NaiveDate {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::Date(d) => Ok(d),
            other => Err(ScalarError::new("date", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Date(*self)
    }
}

impl ScalarValue for XsDateTime {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::DateTime(dt) => Ok(dt),
            other => Err(ScalarError::new("dateTime", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::DateTime(*self)
    }
}

impl ScalarValue for GYearMonth {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::GYearMonth(ym) => Ok(ym),
            other => Err(ScalarError::new("gYearMonth", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::GYearMonth(*self)
    }
}

impl ScalarValue for GYear {
    fn from_scalar(scalar: Scalar) -> Result<Self, ScalarError> {
        match scalar {
            Scalar::GYear(y) => Ok(y),
            other => Err(ScalarError::new("gYear", &other)),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::GYear(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_keeps_offset_and_fraction() {
        let dt = XsDateTime::parse("2024-03-01T10:15:30.250+01:00").unwrap();
        assert_eq!(dt.offset.map(|o| o.local_minus_utc()), Some(3600));
        assert_eq!(dt.to_string(), "2024-03-01T10:15:30.250+01:00");

        let utc = XsDateTime::parse("2024-03-01T10:15:30Z").unwrap();
        assert_eq!(utc.to_string(), "2024-03-01T10:15:30Z");

        let naive = XsDateTime::parse("2024-03-01T10:15:30").unwrap();
        assert!(naive.offset.is_none());
        assert_eq!(naive.to_string(), "2024-03-01T10:15:30");
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(
            GYearMonth::parse("1984-05"),
            Some(GYearMonth {
                year: 1984,
                month: 5
            })
        );
        assert_eq!(GYearMonth::parse("1984-13"), None);
        assert_eq!(GYearMonth::parse("1984-5"), None);
        assert_eq!(GYear::parse("1984"), Some(GYear(1984)));
        assert_eq!(GYear::parse("84"), None);
        assert_eq!(GYear(984).to_string(), "0984");
    }

    #[test]
    fn test_scalar_serializes_decimal_as_number() {
        let value = Scalar::Decimal(Decimal::new(1250, 2));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json.trim_matches('"'), "12.50");
        assert_eq!(serde_json::to_string(&Scalar::Integer(7)).unwrap(), "7");
    }

    #[test]
    fn test_integer_conversion_checks_range() {
        assert_eq!(u16::from_scalar(Scalar::Integer(3983)), Ok(3983));
        let err = u8::from_scalar(Scalar::Integer(3983)).unwrap_err();
        assert_eq!(err.expected, "u8");
        assert!(String::from_scalar(Scalar::Integer(1)).is_err());
    }

    #[test]
    fn test_scalar_json_shape() {
        let json = serde_json::to_string(&vec![
            Scalar::Integer(3),
            Scalar::Boolean(true),
            Scalar::Date(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()),
        ])
        .unwrap();
        assert_eq!(json, r#"[3,true,"2001-02-03"]"#);
    }
}
