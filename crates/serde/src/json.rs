//! JSON views of records and round-trip reports.
//!
//! Inspection output only: XML is the single wire format, so there is no
//! JSON reader.
use serde::Serialize;

/// Serialize a record, typed value or report to a JSON string.
///
/// # Examples
///
/// ```ignore
/// use openmun_serde::json::to_json_string;
///
/// let record = catalog.read_record(&root, Delivery::descriptor(), None)?;
/// let json = to_json_string(&record)?;
/// ```
pub fn to_json_string<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
}

/// Serialize to a pretty-printed JSON string.
pub fn to_json_string_pretty<T>(value: &T) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string_pretty(value)
}

/// Serialize to a `serde_json::Value`.
///
/// # Examples
///
/// ```ignore
/// use openmun_serde::json::to_json_value;
///
/// let report = catalog.verify(&original, &exported);
/// let value = to_json_value(&report)?;
/// assert_eq!(value["is_lossless"], true);
/// ```
pub fn to_json_value<T>(value: &T) -> serde_json::Result<serde_json::Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::diff;
    use crate::xml::{Element, QName};

    #[test]
    fn test_report_to_json() {
        let root = Element::new(QName::new("urn:a", "delivery"));
        let value = to_json_value(&diff(&root, &root)).unwrap();
        assert_eq!(value["is_lossless"], true);
        assert_eq!(value["counts"]["{urn:a}delivery"]["original"], 1);
        assert_eq!(value["counts"]["{urn:a}delivery"]["exported"], 1);
    }
}
