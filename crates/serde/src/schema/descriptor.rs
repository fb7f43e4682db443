use std::fmt;

use super::{ScalarKind, SchemaId};

/// How many times a field's element may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Optional,
    /// Ordered sequence with a minimum number of occurrences.
    Many { min: usize },
}

/// What a field holds.
#[derive(Debug, Clone, Copy)]
pub enum Content {
    Scalar(ScalarKind),
    Model(&'static ModelDescriptor),
    /// Exactly one of the listed alternatives per occurrence.
    Choice(&'static [FieldDescriptor]),
    /// `xs:anyType` content, kept verbatim.
    Any,
}

impl Content {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Content::Scalar(_) => "scalar",
            Content::Model(_) => "record",
            Content::Choice(_) => "choice",
            Content::Any => "any element",
        }
    }
}

/// Element layer between a field and its nested content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    /// The field element is qualified in the content namespace.
    None,
    /// No element layer: the nested model's fields sit directly in the parent.
    Skip,
    /// The field element is qualified in the given namespace while its
    /// children stay in the content namespace.
    Namespaced(SchemaId),
}

/// Metadata for one field of a model type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Overrides the namespace the field's content lives in.
    pub namespace: Option<SchemaId>,
    pub cardinality: Cardinality,
    pub content: Content,
    pub wrapper: Wrapper,
}

impl FieldDescriptor {
    const fn new(name: &'static str, content: Content) -> Self {
        Self {
            name,
            namespace: None,
            cardinality: Cardinality::One,
            content,
            wrapper: Wrapper::None,
        }
    }

    pub const fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self::new(name, Content::Scalar(kind))
    }

    pub const fn model(name: &'static str, model: &'static ModelDescriptor) -> Self {
        Self::new(name, Content::Model(model))
    }

    pub const fn choice(name: &'static str, alternatives: &'static [FieldDescriptor]) -> Self {
        Self::new(name, Content::Choice(alternatives))
    }

    pub const fn any(name: &'static str) -> Self {
        Self::new(name, Content::Any)
    }

    pub const fn optional(self) -> Self {
        Self {
            cardinality: Cardinality::Optional,
            ..self
        }
    }

    pub const fn many(self) -> Self {
        self.at_least(0)
    }

    pub const fn at_least(self, min: usize) -> Self {
        Self {
            cardinality: Cardinality::Many { min },
            ..self
        }
    }

    pub const fn in_namespace(self, namespace: SchemaId) -> Self {
        Self {
            namespace: Some(namespace),
            ..self
        }
    }

    pub const fn wrapped_in(self, namespace: SchemaId) -> Self {
        Self {
            wrapper: Wrapper::Namespaced(namespace),
            ..self
        }
    }

    pub const fn skip_wrapper(self) -> Self {
        Self {
            wrapper: Wrapper::Skip,
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        match self.cardinality {
            Cardinality::One => true,
            Cardinality::Optional => false,
            Cardinality::Many { min } => min > 0,
        }
    }
}

/// An XML attribute declared on a model's element.
#[derive(Debug, Clone, Copy)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub kind: ScalarKind,
    pub required: bool,
}

impl AttributeDescriptor {
    pub const fn required(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Identity of a model type: its schema and XSD type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey {
    pub schema: SchemaId,
    pub name: &'static str,
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.schema, self.name)
    }
}

/// The field table of one model type.
///
/// Fields are listed in XSD sequence order. A `base` makes this type an XSD
/// extension: the base's fields come first and are serialized inline.
pub struct ModelDescriptor {
    pub schema: SchemaId,
    /// XSD type name.
    pub name: &'static str,
    /// Element name used when the model is written as a standalone element.
    pub element: &'static str,
    pub base: Option<&'static ModelDescriptor>,
    pub fields: &'static [FieldDescriptor],
    pub attributes: &'static [AttributeDescriptor],
}

impl ModelDescriptor {
    pub fn key(&self) -> ModelKey {
        ModelKey {
            schema: self.schema,
            name: self.name,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// Descriptor graphs may be recursive, so only the identity is printed.
impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelDescriptor({})", self.key())
    }
}

impl PartialEq for ModelDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ModelDescriptor {}

/// `schema` when it differs from the owner's schema, otherwise the owner's
/// effective namespace. Lets a namespace override on an outer field carry
/// through every type declared in the same schema.
pub(crate) fn inherit_namespace(
    schema: SchemaId,
    owner_schema: SchemaId,
    owner_namespace: SchemaId,
) -> SchemaId {
    if schema == owner_schema {
        owner_namespace
    } else {
        schema
    }
}

/// Namespace of a field's content, given the schema that declared the field
/// and that declaring model's effective namespace.
pub(crate) fn field_namespace(
    field: &FieldDescriptor,
    declaring_schema: SchemaId,
    owner_namespace: SchemaId,
) -> SchemaId {
    if let Some(namespace) = field.namespace {
        return namespace;
    }
    match field.content {
        Content::Model(nested) => inherit_namespace(nested.schema, declaring_schema, owner_namespace),
        _ => owner_namespace,
    }
}

/// Namespace of the field's own element: the wrapper namespace when there
/// is one, otherwise the content namespace `target`.
pub(crate) fn element_namespace(field: &FieldDescriptor, target: SchemaId) -> SchemaId {
    match field.wrapper {
        Wrapper::Namespaced(wrapper) => wrapper,
        _ => target,
    }
}
