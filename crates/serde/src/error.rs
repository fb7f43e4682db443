//! Error types for the eCH codec.
//!
//! Definition-time defects of the descriptor tables surface as
//! [`SchemaDefinitionError`] when the catalog is built. Per-document
//! failures surface as [`ValidationError`] or [`XmlError`]. Every public
//! codec call returns [`CodecError`], which wraps all three.

// Variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

use crate::verify::RoundTripReport;

/// The error type of every public codec call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Defect in the descriptor tables
    #[error(transparent)]
    Schema(#[from] SchemaDefinitionError),

    /// Structurally invalid document or record
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed or unqualified XML
    #[error(transparent)]
    Xml(#[from] XmlError),
}

impl CodecError {
    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            CodecError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// A defect in the descriptor tables, detected while building the catalog.
///
/// These are fatal: a catalog that fails to build must not serve any document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefinitionError {
    #[error("extension cycle: {}", .chain.join(" -> "))]
    ExtensionCycle { chain: Vec<String> },

    #[error("field '{field}' of {model} collides with a field inherited from {base}")]
    FieldCollision {
        model: String,
        field: String,
        base: String,
    },

    #[error("{model}.{field}: wrapper namespace {namespace} equals its content namespace")]
    AmbiguousWrapper {
        model: String,
        field: String,
        namespace: String,
    },

    #[error("{model}.{field}: invalid wrapper: {reason}")]
    InvalidWrapper {
        model: String,
        field: String,
        reason: String,
    },

    #[error("{model}.{field}: invalid choice: {reason}")]
    InvalidChoice {
        model: String,
        field: String,
        reason: String,
    },

    #[error("{model}: field '{field}' cannot be told apart from the preceding field '{previous}'")]
    AmbiguousSequence {
        model: String,
        field: String,
        previous: String,
    },

    #[error("{model} uses schema {schema}, which has no registered namespace")]
    UnregisteredNamespace { model: String, schema: String },

    #[error("duplicate namespace registration: {0}")]
    DuplicateNamespace(String),

    #[error("two distinct descriptors are registered as {0}")]
    DuplicateModel(String),

    #[error("model {0} is not part of the catalog")]
    UnregisteredModel(String),

    #[error("{model}.{field}: invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        model: String,
        field: String,
        pattern: String,
        message: String,
    },

    #[error("envelope {envelope}: event variant '{tag}' is declared twice for {schema}")]
    DuplicateVariant {
        envelope: String,
        schema: String,
        tag: String,
    },
}

/// A document or record does not conform to its model's descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Model type being processed when the failure occurred
    pub model: String,
    /// Slash-separated field path from the codec call's root
    pub path: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(model: impl Into<String>, path: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            model: model.into(),
            path: path.into(),
            reason,
        }
    }

    /// The innermost field name of the path.
    pub fn field(&self) -> &str {
        let last = self.path.rsplit('/').next().unwrap_or_default();
        last.split('[').next().unwrap_or(last)
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        self.reason.code()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        };
        write!(f, "{} at {}: {}", self.model, path, self.reason)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("missing required field")]
    MissingRequiredField,

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("unknown event type '{tag}'")]
    UnknownEventType { tag: String },

    #[error("more than one choice alternative present: {}", .alternatives.join(", "))]
    AmbiguousChoice { alternatives: Vec<String> },

    #[error("unexpected element '{element}'")]
    UnexpectedElement { element: String },

    #[error("no event variants are defined for version {version}")]
    UnsupportedVersion { version: String },
}

impl ValidationReason {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::MissingRequiredField => "MissingRequiredField",
            ValidationReason::TypeMismatch { .. } => "TypeMismatch",
            ValidationReason::UnknownEventType { .. } => "UnknownEventType",
            ValidationReason::AmbiguousChoice { .. } => "AmbiguousChoice",
            ValidationReason::UnexpectedElement { .. } => "UnexpectedElement",
            ValidationReason::UnsupportedVersion { .. } => "UnsupportedVersion",
        }
    }

    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ValidationReason::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Low-level XML failures, independent of any model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("unbound namespace prefix in '{0}'")]
    UnboundPrefix(String),

    #[error("element <{0}> has no namespace")]
    MissingNamespace(String),

    #[error("element <{0}> mixes text with child elements")]
    MixedContent(String),

    #[error("document has no root element")]
    EmptyDocument,

    #[error("failed to write XML: {0}")]
    Write(String),
}

/// A re-exported document is not structurally equal to its original.
///
/// Only produced by round-trip verification, never by `from_xml`/`to_xml`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("round trip is not lossless: {}", .report.summary())]
pub struct RoundTripMismatch {
    pub report: RoundTripReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::new(
            "eCH-0010/5:addressInformation",
            "mailAddress/addressInformation/town",
            ValidationReason::MissingRequiredField,
        );
        assert_eq!(err.field(), "town");
        assert_eq!(err.code(), "MissingRequiredField");
        assert_eq!(
            err.to_string(),
            "eCH-0010/5:addressInformation at mailAddress/addressInformation/town: missing required field"
        );

        let indexed = ValidationError::new("m", "reportedPerson[2]", ValidationReason::MissingRequiredField);
        assert_eq!(indexed.field(), "reportedPerson");
        assert!(ValidationError::new("m", "", ValidationReason::MissingRequiredField)
            .to_string()
            .contains("(root)"));
    }

    #[test]
    fn test_codec_error_is_transparent() {
        let err: CodecError = XmlError::EmptyDocument.into();
        assert_eq!(err.to_string(), "document has no root element");
        assert!(err.as_validation().is_none());
    }
}
