use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use openmun_serde_support::{GYear, GYearMonth, Scalar, XsDateTime};
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValidationReason;

/// XSD simple type of a leaf, including its restriction facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `xs:string`/`xs:token` with length facets counted in characters.
    Text {
        min_length: usize,
        max_length: Option<usize>,
        pattern: Option<&'static str>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Decimal,
    Boolean,
    Date,
    DateTime,
    GYearMonth,
    GYear,
    /// Closed enumeration of string codes.
    Code(&'static [&'static str]),
}

impl ScalarKind {
    pub const TEXT: Self = ScalarKind::Text {
        min_length: 0,
        max_length: None,
        pattern: None,
    };

    pub const INTEGER: Self = ScalarKind::Integer {
        min: None,
        max: None,
    };

    pub const fn text(min_length: usize, max_length: usize) -> Self {
        ScalarKind::Text {
            min_length,
            max_length: Some(max_length),
            pattern: None,
        }
    }

    pub const fn pattern(pattern: &'static str) -> Self {
        ScalarKind::Text {
            min_length: 0,
            max_length: None,
            pattern: Some(pattern),
        }
    }

    pub const fn range(min: i64, max: i64) -> Self {
        ScalarKind::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Text { .. } => "string",
            ScalarKind::Integer { .. } => "integer",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Date => "date",
            ScalarKind::DateTime => "dateTime",
            ScalarKind::GYearMonth => "gYearMonth",
            ScalarKind::GYear => "gYear",
            ScalarKind::Code(_) => "code",
        }
    }

    pub(crate) fn pattern_str(&self) -> Option<&'static str> {
        match self {
            ScalarKind::Text { pattern, .. } => *pattern,
            _ => None,
        }
    }

    /// Converts the lexical form of a leaf, then checks its facets.
    pub(crate) fn parse(
        &self,
        raw: &str,
        patterns: &PatternSet,
    ) -> Result<Scalar, ValidationReason> {
        let raw = raw.trim();
        let mismatch = || ValidationReason::type_mismatch(self.type_name(), format!("'{}'", raw));

        let value = match self {
            ScalarKind::Text { .. } | ScalarKind::Code(_) => Scalar::Text(raw.to_string()),
            ScalarKind::Integer { .. } => {
                Scalar::Integer(raw.parse::<i64>().map_err(|_| mismatch())?)
            }
            ScalarKind::Decimal => {
                Scalar::Decimal(Decimal::from_str(raw).map_err(|_| mismatch())?)
            }
            ScalarKind::Boolean => match raw {
                "true" | "1" => Scalar::Boolean(true),
                "false" | "0" => Scalar::Boolean(false),
                _ => return Err(mismatch()),
            },
            ScalarKind::Date => Scalar::Date(parse_date(raw).ok_or_else(mismatch)?),
            ScalarKind::DateTime => Scalar::DateTime(XsDateTime::parse(raw).ok_or_else(mismatch)?),
            ScalarKind::GYearMonth => {
                Scalar::GYearMonth(GYearMonth::parse(raw).ok_or_else(mismatch)?)
            }
            ScalarKind::GYear => Scalar::GYear(GYear::parse(raw).ok_or_else(mismatch)?),
        };

        self.check(&value, patterns)?;
        Ok(value)
    }

    /// Checks that a value has this kind's type and satisfies its facets.
    pub(crate) fn check(&self, value: &Scalar, patterns: &PatternSet) -> Result<(), ValidationReason> {
        match (self, value) {
            (
                ScalarKind::Text {
                    min_length,
                    max_length,
                    pattern,
                },
                Scalar::Text(s),
            ) => {
                let length = s.chars().count();
                if length < *min_length || max_length.is_some_and(|max| length > max) {
                    let bounds = match max_length {
                        Some(max) => format!("string of {}..={} characters", min_length, max),
                        None => format!("string of at least {} characters", min_length),
                    };
                    return Err(ValidationReason::type_mismatch(
                        bounds,
                        format!("{} characters", length),
                    ));
                }
                if let Some(pattern) = pattern {
                    if !patterns.is_match(pattern, s) {
                        return Err(ValidationReason::type_mismatch(
                            format!("string matching '{}'", pattern),
                            format!("'{}'", s),
                        ));
                    }
                }
                Ok(())
            }
            (ScalarKind::Code(codes), Scalar::Text(s)) => {
                if codes.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(ValidationReason::type_mismatch(
                        format!("one of {}", codes.join("|")),
                        format!("'{}'", s),
                    ))
                }
            }
            (ScalarKind::Integer { min, max }, Scalar::Integer(i)) => {
                if min.is_some_and(|m| *i < m) || max.is_some_and(|m| *i > m) {
                    Err(ValidationReason::type_mismatch(
                        format!(
                            "integer in {}..={}",
                            min.map_or_else(String::new, |m| m.to_string()),
                            max.map_or_else(String::new, |m| m.to_string())
                        ),
                        i.to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            (ScalarKind::Decimal, Scalar::Decimal(_))
            | (ScalarKind::Boolean, Scalar::Boolean(_))
            | (ScalarKind::Date, Scalar::Date(_))
            | (ScalarKind::DateTime, Scalar::DateTime(_))
            | (ScalarKind::GYearMonth, Scalar::GYearMonth(_))
            | (ScalarKind::GYear, Scalar::GYear(_)) => Ok(()),
            (kind, other) => Err(ValidationReason::type_mismatch(
                kind.type_name(),
                other.type_name(),
            )),
        }
    }

    /// Canonical lexical form of a value of this kind.
    pub(crate) fn format(&self, value: &Scalar) -> String {
        value.to_string()
    }
}

/// `xs:date`, tolerating a trailing timezone designator.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let (date, zone) = raw.split_at_checked(10)?;
    let zone_ok = zone.is_empty()
        || zone == "Z"
        || (zone.len() == 6
            && (zone.starts_with('+') || zone.starts_with('-'))
            && zone.as_bytes()[3] == b':');
    if !zone_ok {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Compiled `pattern` facets, anchored to the whole value.
#[derive(Debug, Clone, Default)]
pub(crate) struct PatternSet {
    compiled: HashMap<&'static str, Regex>,
}

impl PatternSet {
    pub(crate) fn compile(&mut self, pattern: &'static str) -> Result<(), regex::Error> {
        if !self.compiled.contains_key(pattern) {
            let regex = Regex::new(&format!("^(?:{})$", pattern))?;
            self.compiled.insert(pattern, regex);
        }
        Ok(())
    }

    fn is_match(&self, pattern: &str, value: &str) -> bool {
        self.compiled
            .get(pattern)
            .is_some_and(|regex| regex.is_match(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> PatternSet {
        let mut set = PatternSet::default();
        set.compile("[0-9]{13}").unwrap();
        set
    }

    #[test]
    fn test_integer_range() {
        let zip = ScalarKind::range(1000, 9999);
        assert_eq!(zip.parse(" 3983 ", &patterns()), Ok(Scalar::Integer(3983)));
        assert!(matches!(
            zip.parse("999", &patterns()),
            Err(ValidationReason::TypeMismatch { .. })
        ));
        assert!(matches!(
            zip.parse("39a3", &patterns()),
            Err(ValidationReason::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_text_facets_count_characters() {
        let town = ScalarKind::text(1, 5);
        assert!(town.parse("Zürich", &patterns()).is_err());
        assert!(town.parse("Sitte", &patterns()).is_ok());
        assert!(town.parse("", &patterns()).is_err());

        let vn = ScalarKind::pattern("[0-9]{13}");
        assert!(vn.parse("7561234567897", &patterns()).is_ok());
        assert!(vn.parse("756123456789", &patterns()).is_err());
        assert!(vn.parse("x7561234567897", &patterns()).is_err());
    }

    #[test]
    fn test_boolean_and_codes() {
        assert_eq!(
            ScalarKind::Boolean.parse("1", &patterns()),
            Ok(Scalar::Boolean(true))
        );
        assert!(ScalarKind::Boolean.parse("yes", &patterns()).is_err());

        let action = ScalarKind::Code(&["1", "3", "4"]);
        assert!(action.parse("3", &patterns()).is_ok());
        assert!(action.parse("2", &patterns()).is_err());
    }

    #[test]
    fn test_dates() {
        let set = patterns();
        assert_eq!(
            ScalarKind::Date.parse("2001-02-03+01:00", &set),
            Ok(Scalar::Date(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()))
        );
        assert!(ScalarKind::Date.parse("2001-02-30", &set).is_err());
        assert!(ScalarKind::DateTime.parse("2001-02-03T04:05:06Z", &set).is_ok());
        assert!(ScalarKind::GYear.parse("2001-02", &set).is_err());
    }

    #[test]
    fn test_check_rejects_wrong_type() {
        let err = ScalarKind::Date
            .check(&Scalar::Text("2001-02-03".into()), &patterns())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationReason::TypeMismatch {
                expected: "date".into(),
                found: "string".into()
            }
        );
    }
}
