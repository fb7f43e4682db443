//! # OpenMun eCH Codec Engine
//!
//! Descriptor-driven XML codec for the Swiss eCH e-government schema
//! families. Model types are described once by static tables
//! ([`ModelDescriptor`], [`FieldDescriptor`]); one generic deserializer and
//! one generic serializer interpret them.
//!
//! ## Architecture
//!
//! - **Schema Layer**: schema identifiers, the [`NamespaceRegistry`], field
//!   descriptors and the extension resolver ([`resolve_fields`])
//! - **Catalog**: the immutable, validated set of models and envelopes. All
//!   descriptor defects surface when it is built, never per document.
//! - **XML Layer**: a namespace-resolved element tree read and written with
//!   `quick-xml`, plus the record reader and writer over it
//! - **Typed Layer**: [`EchModel`] / [`EchChoice`] map records onto Rust
//!   structs and enums
//! - **Dispatch**: envelopes carrying exactly one event from a closed,
//!   per-version variant table
//! - **Verify**: the structural round-trip check
//!
//! ## Examples
//!
//! ```ignore
//! use openmun_serde::{Catalog, SerializeOptions};
//!
//! let address: SwissAddressInformation = catalog.from_xml_str(xml)?;
//! let exported = catalog.to_xml_string(&address, &SerializeOptions::default())?;
//! let report = catalog.verify(&Element::parse(xml)?, &Element::parse(&exported)?);
//! assert!(report.is_lossless);
//! ```

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod json;
pub mod record;
pub mod schema;
pub mod verify;
pub mod xml;

pub use catalog::{Catalog, CatalogBuilder, SerializeOptions};
pub use dispatch::{
    DispatchedRecord, EnvelopeDescriptor, EnvelopeVersion, EventEnvelope, EventFamily,
    EventVariant, unknown_event,
};
pub use error::{
    CodecError, Result, RoundTripMismatch, SchemaDefinitionError, ValidationError,
    ValidationReason, XmlError,
};
pub use record::{
    Alternative, EchChoice, EchModel, FieldValue, Record, RecordReader, RecordWriter, Value,
};
pub use schema::{
    AttributeDescriptor, Cardinality, Content, FieldDescriptor, ModelDescriptor, ModelKey,
    NamespaceEntry, NamespaceRegistry, ResolvedField, ScalarKind, SchemaId, Wrapper,
    resolve_fields,
};
pub use verify::{RoundTripReport, TagCount};
pub use xml::{Attribute, Element, QName};

pub use openmun_serde_support::{GYear, GYearMonth, Scalar, ScalarValue, XsDateTime, coded_enum};
