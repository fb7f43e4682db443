//! [`Record`] to element tree, the exact inverse of the deserializer.
//!
//! Output order follows the resolved field table, never the order fields
//! were set on the record. A fragment is built completely before it is
//! handed back, so a failed call leaves the caller's tree untouched.

use tracing::trace;

use crate::catalog::Catalog;
use crate::error::{Result, ValidationReason};
use crate::record::{FieldValue, Record, Value, index_path, join_path};
use crate::schema::{
    Cardinality, Content, FieldDescriptor, ModelDescriptor, ResolvedField, SchemaId, Wrapper,
    element_namespace, field_namespace, inherit_namespace,
};

use super::de::invalid;
use super::{Attribute, Element, QName};

pub(crate) struct Serializer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Serializer<'c> {
    pub(crate) fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Builds the element `name` holding `record` as `model`.
    pub(crate) fn write_model(
        &self,
        record: &Record,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        name: QName,
        path: &str,
    ) -> Result<Element> {
        trace!(model = %model.key(), path = %path, "writing model");
        check_model(record, model, path)?;
        let mut element = Element::new(name);
        self.write_attributes(record, model, path, &mut element)?;
        self.write_fields(record, model, namespace, path, &mut element.children)?;
        Ok(element)
    }

    /// Appends `record`'s fields to `out` in descriptor order.
    pub(crate) fn write_fields(
        &self,
        record: &Record,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        path: &str,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        check_model(record, model, path)?;
        let fields = self.catalog.fields(model)?;

        if let Some((unknown, _)) = record
            .fields()
            .find(|(name, _)| !fields.iter().any(|r| r.field.name == *name))
        {
            return Err(invalid(
                model,
                &join_path(path, unknown),
                ValidationReason::UnexpectedElement {
                    element: unknown.to_string(),
                },
            ));
        }

        for resolved in fields {
            let value = record.get(resolved.field.name).unwrap_or(&FieldValue::Absent);
            self.write_field(value, model, resolved, namespace, path, out)?;
        }
        Ok(())
    }

    fn write_attributes(
        &self,
        record: &Record,
        model: &'static ModelDescriptor,
        path: &str,
        element: &mut Element,
    ) -> Result<()> {
        for (name, _) in record.attributes() {
            if !model.attributes.iter().any(|a| a.name == name) {
                return Err(invalid(
                    model,
                    path,
                    ValidationReason::UnexpectedElement {
                        element: format!("@{}", name),
                    },
                ));
            }
        }

        for declared in model.attributes {
            let attr_path = join_path(path, &format!("@{}", declared.name));
            match record.attribute(declared.name) {
                Some(value) => {
                    declared
                        .kind
                        .check(value, self.catalog.patterns())
                        .map_err(|reason| invalid(model, &attr_path, reason))?;
                    element
                        .attributes
                        .push(Attribute::new(declared.name, declared.kind.format(value)));
                }
                None if declared.required => {
                    return Err(invalid(
                        model,
                        &attr_path,
                        ValidationReason::MissingRequiredField,
                    ));
                }
                None => {}
            }
        }
        Ok(())
    }

    fn write_field(
        &self,
        value: &FieldValue,
        model: &'static ModelDescriptor,
        resolved: &ResolvedField,
        namespace: SchemaId,
        path: &str,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        let field = resolved.field;
        let declaring = resolved.declared_in.schema;
        let owner = inherit_namespace(declaring, model.schema, namespace);
        let target = field_namespace(field, declaring, owner);
        let field_path = join_path(path, field.name);

        if field.wrapper == Wrapper::Skip {
            return match (field.content, value) {
                (Content::Model(nested), FieldValue::One(Value::Record(inner))) => {
                    self.write_fields(inner, nested, target, &field_path, out)
                }
                (_, FieldValue::Absent) => Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::MissingRequiredField,
                )),
                _ => Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::type_mismatch("record", "other value"),
                )),
            };
        }

        let occurrence = |value: &Value, path: &str| {
            self.write_occurrence(value, model, field, declaring, target, path)
        };

        match (field.cardinality, value) {
            (Cardinality::One, FieldValue::One(v)) | (Cardinality::Optional, FieldValue::One(v)) => {
                out.push(occurrence(v, &field_path)?);
            }
            (Cardinality::One, FieldValue::Absent) => {
                return Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::MissingRequiredField,
                ));
            }
            (Cardinality::Optional, FieldValue::Absent) => {}
            (Cardinality::One | Cardinality::Optional, FieldValue::Many(_)) => {
                return Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::type_mismatch("single value", "sequence"),
                ));
            }
            (Cardinality::Many { min }, FieldValue::Many(values)) => {
                if values.len() < min {
                    return Err(invalid(
                        model,
                        &index_path(path, field.name, values.len()),
                        ValidationReason::MissingRequiredField,
                    ));
                }
                let mut elements = Vec::with_capacity(values.len());
                for (i, v) in values.iter().enumerate() {
                    elements.push(occurrence(v, &index_path(path, field.name, i))?);
                }
                out.extend(elements);
            }
            (Cardinality::Many { min }, FieldValue::Absent) => {
                if min > 0 {
                    return Err(invalid(
                        model,
                        &index_path(path, field.name, 0),
                        ValidationReason::MissingRequiredField,
                    ));
                }
            }
            (Cardinality::Many { .. }, FieldValue::One(_)) => {
                return Err(invalid(
                    model,
                    &field_path,
                    ValidationReason::type_mismatch("sequence", "single value"),
                ));
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_occurrence(
        &self,
        value: &Value,
        model: &'static ModelDescriptor,
        field: &'static FieldDescriptor,
        declaring: SchemaId,
        target: SchemaId,
        path: &str,
    ) -> Result<Element> {
        if let Content::Choice(alternatives) = field.content {
            let Value::Choice { alternative, value } = value else {
                return Err(invalid(
                    model,
                    path,
                    ValidationReason::type_mismatch("choice", value.kind_name()),
                ));
            };
            let Some(alt) = alternatives.iter().find(|a| a.name == *alternative) else {
                return Err(invalid(
                    model,
                    path,
                    ValidationReason::UnexpectedElement {
                        element: alternative.to_string(),
                    },
                ));
            };
            let alt_namespace = field_namespace(alt, declaring, target);
            let name = self
                .catalog
                .registry()
                .qualify(alt.name, element_namespace(alt, alt_namespace))?;
            return self.write_content(value, model, alt, alt_namespace, name, &join_path(path, alt.name));
        }

        let name = self
            .catalog
            .registry()
            .qualify(field.name, element_namespace(field, target))?;
        self.write_content(value, model, field, target, name, path)
    }

    fn write_content(
        &self,
        value: &Value,
        model: &'static ModelDescriptor,
        field: &'static FieldDescriptor,
        target: SchemaId,
        name: QName,
        path: &str,
    ) -> Result<Element> {
        match (field.content, value) {
            (Content::Scalar(kind), Value::Scalar(scalar)) => {
                kind.check(scalar, self.catalog.patterns())
                    .map_err(|reason| invalid(model, path, reason))?;
                Ok(Element::leaf(name, kind.format(scalar)))
            }
            (Content::Model(nested), Value::Record(record)) => {
                self.write_model(record, nested, target, name, path)
            }
            (Content::Any, Value::Any(element)) => {
                let mut element = element.clone();
                element.name = name;
                Ok(element)
            }
            (content, other) => Err(invalid(
                model,
                path,
                ValidationReason::type_mismatch(content.kind_name(), other.kind_name()),
            )),
        }
    }
}

fn check_model(record: &Record, model: &'static ModelDescriptor, path: &str) -> Result<()> {
    if record.model() == model {
        Ok(())
    } else {
        Err(invalid(
            model,
            path,
            ValidationReason::type_mismatch(
                model.key().to_string(),
                record.model().key().to_string(),
            ),
        ))
    }
}
