//! Element tree to [`Record`], driven by the resolved field tables.
//!
//! Children are consumed by a single cursor in descriptor order. Every field
//! either matches at the cursor or is absent; anything the descriptors do not
//! account for is an error.

use tracing::trace;

use crate::catalog::Catalog;
use crate::error::{Result, ValidationError, ValidationReason};
use crate::record::{FieldValue, Record, Value, index_path, join_path};
use crate::schema::{
    Cardinality, Content, FieldDescriptor, ModelDescriptor, ResolvedField, SchemaId, Wrapper,
    XSI_NAMESPACE, element_namespace, field_namespace, inherit_namespace,
};

use super::Element;

pub(crate) struct Deserializer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Deserializer<'c> {
    pub(crate) fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Reads `element`'s attributes and children as `model`, with the
    /// model's own fields in `namespace`.
    pub(crate) fn read_model(
        &self,
        element: &Element,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        path: &str,
    ) -> Result<Record> {
        let (record, cursor) = self.read_prefix(element, model, namespace, path)?;
        expect_end(&element.children, cursor, model, path)?;
        Ok(record)
    }

    /// Like [`Self::read_model`], but stops after the model's last field and
    /// returns the cursor instead of rejecting the remaining children.
    pub(crate) fn read_prefix(
        &self,
        element: &Element,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        path: &str,
    ) -> Result<(Record, usize)> {
        trace!(model = %model.key(), path = %path, "reading model");
        let mut record = Record::new(model);
        self.read_attributes(element, model, path, &mut record)?;

        if element.children.is_empty() && !element.text().trim().is_empty() {
            return Err(invalid(
                model,
                path,
                ValidationReason::UnexpectedElement {
                    element: "#text".to_string(),
                },
            ));
        }

        let mut cursor = 0;
        self.read_fields(&element.children, &mut cursor, model, namespace, path, &mut record)?;
        Ok((record, cursor))
    }

    /// Reads `model`'s fields from `children`, starting at `cursor`.
    pub(crate) fn read_fields(
        &self,
        children: &[Element],
        cursor: &mut usize,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        path: &str,
        record: &mut Record,
    ) -> Result<()> {
        for resolved in self.catalog.fields(model)? {
            let value = self.read_field(children, cursor, model, resolved, namespace, path)?;
            record.set(resolved.field.name, value);
        }
        Ok(())
    }

    fn read_attributes(
        &self,
        element: &Element,
        model: &'static ModelDescriptor,
        path: &str,
        record: &mut Record,
    ) -> Result<()> {
        for attr in &element.attributes {
            if attr.namespace.as_deref() == Some(XSI_NAMESPACE) {
                continue;
            }
            let declared = match attr.namespace {
                None => model.attributes.iter().find(|a| a.name == attr.local),
                Some(_) => None,
            };
            let Some(declared) = declared else {
                return Err(invalid(
                    model,
                    path,
                    ValidationReason::UnexpectedElement {
                        element: attr.display_name(),
                    },
                ));
            };
            let value = declared
                .kind
                .parse(&attr.value, self.catalog.patterns())
                .map_err(|reason| {
                    invalid(model, &join_path(path, &format!("@{}", declared.name)), reason)
                })?;
            record.set_attribute(declared.name, value);
        }

        for declared in model.attributes {
            if declared.required && record.attribute(declared.name).is_none() {
                return Err(invalid(
                    model,
                    &join_path(path, &format!("@{}", declared.name)),
                    ValidationReason::MissingRequiredField,
                ));
            }
        }
        Ok(())
    }

    fn read_field(
        &self,
        children: &[Element],
        cursor: &mut usize,
        model: &'static ModelDescriptor,
        resolved: &ResolvedField,
        namespace: SchemaId,
        path: &str,
    ) -> Result<FieldValue> {
        let field = resolved.field;
        let declaring = resolved.declared_in.schema;
        let owner = inherit_namespace(declaring, model.schema, namespace);
        let target = field_namespace(field, declaring, owner);
        let field_path = join_path(path, field.name);

        if field.wrapper == Wrapper::Skip {
            let Content::Model(nested) = field.content else {
                return Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::type_mismatch("record", field.content.kind_name()),
                ));
            };
            let mut inner = Record::new(nested);
            self.read_fields(children, cursor, nested, target, &field_path, &mut inner)?;
            return Ok(FieldValue::One(Value::Record(inner)));
        }

        let occurrence = |cursor: &mut usize, path: &str| {
            self.read_occurrence(children, cursor, model, field, declaring, target, path)
        };

        let value = match field.cardinality {
            Cardinality::One => match occurrence(cursor, &field_path)? {
                Some(value) => FieldValue::One(value),
                None => {
                    return Err(invalid(
                        model,
                        &field_path,
                        ValidationReason::MissingRequiredField,
                    ));
                }
            },
            Cardinality::Optional => match occurrence(cursor, &field_path)? {
                Some(value) => FieldValue::One(value),
                None => FieldValue::Absent,
            },
            Cardinality::Many { min } => {
                let mut values = Vec::new();
                while let Some(value) =
                    occurrence(cursor, &index_path(path, field.name, values.len()))?
                {
                    values.push(value);
                }
                if values.len() < min {
                    return Err(invalid(
                        model,
                        &index_path(path, field.name, values.len()),
                        ValidationReason::MissingRequiredField,
                    ));
                }
                return Ok(FieldValue::Many(values));
            }
        };

        // A single choice occurrence followed by another alternative of the
        // same choice means the document carries more than one.
        if let (Content::Choice(alternatives), FieldValue::One(Value::Choice { alternative, .. })) =
            (field.content, &value)
        {
            if let Some(next) = children.get(*cursor) {
                if let Some(extra) = alternatives.iter().find(|alt| {
                    let content = field_namespace(alt, declaring, target);
                    self.matches(next, alt.name, element_namespace(alt, content))
                }) {
                    return Err(invalid(
                        model,
                        &field_path,
                        ValidationReason::AmbiguousChoice {
                            alternatives: vec![alternative.to_string(), extra.name.to_string()],
                        },
                    ));
                }
            }
        }
        Ok(value)
    }

    #[allow(clippy::too_many_arguments)]
    fn read_occurrence(
        &self,
        children: &[Element],
        cursor: &mut usize,
        model: &'static ModelDescriptor,
        field: &'static FieldDescriptor,
        declaring: SchemaId,
        target: SchemaId,
        path: &str,
    ) -> Result<Option<Value>> {
        let Some(child) = children.get(*cursor) else {
            return Ok(None);
        };

        if let Content::Choice(alternatives) = field.content {
            for alt in alternatives {
                let alt_namespace = field_namespace(alt, declaring, target);
                if self.matches(child, alt.name, element_namespace(alt, alt_namespace)) {
                    *cursor += 1;
                    let value =
                        self.read_content(child, model, alt, alt_namespace, &join_path(path, alt.name))?;
                    return Ok(Some(Value::Choice {
                        alternative: alt.name,
                        value: Box::new(value),
                    }));
                }
            }
            return Ok(None);
        }

        if !self.matches(child, field.name, element_namespace(field, target)) {
            return Ok(None);
        }
        *cursor += 1;
        self.read_content(child, model, field, target, path).map(Some)
    }

    fn read_content(
        &self,
        element: &Element,
        model: &'static ModelDescriptor,
        field: &'static FieldDescriptor,
        target: SchemaId,
        path: &str,
    ) -> Result<Value> {
        match field.content {
            Content::Scalar(kind) => {
                if let Some(child) = element.children.first() {
                    return Err(invalid(
                        model,
                        path,
                        ValidationReason::UnexpectedElement {
                            element: child.name.to_string(),
                        },
                    ));
                }
                if let Some(attr) = element
                    .attributes
                    .iter()
                    .find(|a| a.namespace.as_deref() != Some(XSI_NAMESPACE))
                {
                    return Err(invalid(
                        model,
                        path,
                        ValidationReason::UnexpectedElement {
                            element: attr.display_name(),
                        },
                    ));
                }
                let value = kind
                    .parse(element.text(), self.catalog.patterns())
                    .map_err(|reason| invalid(model, path, reason))?;
                Ok(Value::Scalar(value))
            }
            Content::Model(nested) => Ok(Value::Record(self.read_model(element, nested, target, path)?)),
            Content::Any => Ok(Value::Any(element.clone())),
            Content::Choice(_) => Err(invalid(
                model,
                path,
                ValidationReason::type_mismatch("choice alternative", "nested choice"),
            )),
        }
    }

    fn matches(&self, element: &Element, local: &str, schema: SchemaId) -> bool {
        element.name.local == local
            && self.catalog.registry().schema_for(&element.name.namespace) == Some(schema)
    }
}

/// Fails when children remain after every field had its turn.
pub(crate) fn expect_end(
    children: &[Element],
    cursor: usize,
    model: &'static ModelDescriptor,
    path: &str,
) -> Result<()> {
    match children.get(cursor) {
        Some(extra) => Err(invalid(
            model,
            path,
            ValidationReason::UnexpectedElement {
                element: extra.name.to_string(),
            },
        )),
        None => Ok(()),
    }
}

pub(crate) fn invalid(
    model: &ModelDescriptor,
    path: &str,
    reason: ValidationReason,
) -> crate::error::CodecError {
    ValidationError::new(model.key().to_string(), path, reason).into()
}
