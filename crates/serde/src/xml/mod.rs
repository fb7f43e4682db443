//! XML support for eCH documents.
//!
//! Documents are parsed into a small namespace-resolved [`Element`] tree
//! with `quick-xml`, then mapped onto records by the descriptor-driven
//! deserializer. The serializer walks the same descriptors in the other
//! direction and the writer assigns one prefix per namespace for the
//! duration of a single write.
//!
//! ## Wire mapping
//!
//! | Descriptor | XML |
//! |------------|-----|
//! | scalar field `town` | `<ns:town>Bister</ns:town>` |
//! | optional field, absent | nothing |
//! | ordered-many field | one element per value, in order |
//! | model field | element with the nested model's fields as children |
//! | wrapped model field | element in the wrapper namespace, children in the content namespace |
//! | skip-wrapper model field | the nested model's fields inline, no element layer |
//! | extension | base fields first, inline, then the derived fields |
//! | choice field | the element of the one alternative present |

pub(crate) mod de;
pub(crate) mod ser;
mod tree;
mod writer;

pub use tree::{Attribute, Descendants, Element, QName};

pub(crate) use writer::{NamespaceBindings, write_document};
