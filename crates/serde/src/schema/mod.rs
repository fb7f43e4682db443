//! Schema metadata: identifiers, namespaces, field descriptors and the
//! extension resolver.
//!
//! Everything in here is immutable `'static` data. Descriptor tables are
//! declared as `static` items by the catalog crate and validated once when a
//! [`Catalog`](crate::Catalog) is built.

mod descriptor;
mod namespace;
mod resolve;
mod scalar;

use std::fmt;

use serde::Serialize;

pub use descriptor::{
    AttributeDescriptor, Cardinality, Content, FieldDescriptor, ModelDescriptor, ModelKey, Wrapper,
};
pub use namespace::{NamespaceEntry, NamespaceRegistry, XSI_NAMESPACE};
pub use resolve::{ResolvedField, resolve_fields};
pub use scalar::ScalarKind;

pub(crate) use descriptor::{element_namespace, field_namespace, inherit_namespace};
pub(crate) use scalar::PatternSet;

/// A schema family at one revision, e.g. `eCH-0010` version 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SchemaId {
    pub family: &'static str,
    pub version: u16,
}

impl SchemaId {
    pub const fn new(family: &'static str, version: u16) -> Self {
        Self { family, version }
    }

    /// The namespace URI eCH assigns to this schema revision.
    pub fn canonical_uri(&self) -> String {
        format!("http://www.ech.ch/xmlns/{}/{}", self.family, self.version)
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.family, self.version)
    }
}
