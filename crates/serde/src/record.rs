//! Typed records.
//!
//! The codec works on [`Record`], a dynamic value whose shape is fixed by a
//! [`ModelDescriptor`]. Concrete model structs implement [`EchModel`] and
//! move their fields in and out of a record through [`RecordReader`] and
//! [`RecordWriter`]. Both directions go through the same descriptor
//! validation, so a typed value can only reach XML, or come from it, when it
//! conforms.

use openmun_serde_support::{Scalar, ScalarValue};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ValidationError, ValidationReason};
use crate::schema::ModelDescriptor;
use crate::xml::Element;

/// One occurrence of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Record(Record),
    /// The alternative taken by a choice field.
    Choice {
        alternative: &'static str,
        value: Box<Value>,
    },
    Any(Element),
}

impl Value {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Record(_) => "record",
            Value::Choice { .. } => "choice",
            Value::Any(_) => "any element",
        }
    }
}

/// All occurrences of a field. `Absent` is distinct from a present but empty
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    One(Value),
    Many(Vec<Value>),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// An instance of a model type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: &'static ModelDescriptor,
    fields: Vec<(&'static str, FieldValue)>,
    attributes: Vec<(&'static str, Scalar)>,
}

impl Record {
    pub fn new(model: &'static ModelDescriptor) -> Self {
        Self {
            model,
            fields: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn set(&mut self, name: &'static str, value: FieldValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Removes a field, leaving it absent.
    pub fn take(&mut self, name: &str) -> FieldValue {
        match self.fields.iter().position(|(n, _)| *n == name) {
            Some(index) => self.fields.remove(index).1,
            None => FieldValue::Absent,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn attribute(&self, name: &str) -> Option<&Scalar> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn set_attribute(&mut self, name: &'static str, value: Scalar) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Scalar)> {
        self.attributes.iter().map(|(n, v)| (*n, v))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in &self.attributes {
            map.serialize_entry(&format!("@{}", name), value)?;
        }
        for (name, value) in &self.fields {
            match value {
                FieldValue::Absent => {}
                FieldValue::One(v) => map.serialize_entry(name, v)?,
                FieldValue::Many(vs) => map.serialize_entry(name, vs)?,
            }
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(s) => s.serialize(serializer),
            Value::Record(r) => r.serialize(serializer),
            Value::Choice { alternative, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(alternative, value)?;
                map.end()
            }
            Value::Any(element) => serializer.collect_str(&element.name),
        }
    }
}

/// A model type with a descriptor table.
pub trait EchModel: Sized {
    fn descriptor() -> &'static ModelDescriptor;

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError>;

    fn write(&self, writer: &mut RecordWriter);

    fn from_record(record: Record) -> Result<Self, ValidationError> {
        let mut reader = RecordReader::new(record, String::new());
        Self::read(&mut reader)
    }

    fn to_record(&self) -> Record {
        let mut writer = RecordWriter::new(Self::descriptor());
        self.write(&mut writer);
        writer.finish()
    }
}

/// A choice-of-alternatives field mapped onto a Rust enum.
pub trait EchChoice: Sized {
    fn read(alternative: Alternative) -> Result<Self, ValidationError>;

    fn write(&self) -> Alternative;
}

/// The alternative taken by one choice occurrence.
#[derive(Debug)]
pub struct Alternative {
    name: &'static str,
    value: Value,
    model: String,
    path: String,
}

impl Alternative {
    pub fn scalar<T: ScalarValue>(name: &'static str, value: &T) -> Self {
        Self::from_value(name, Value::Scalar(value.to_scalar()))
    }

    pub fn record<T: EchModel>(name: &'static str, value: &T) -> Self {
        Self::from_value(name, Value::Record(value.to_record()))
    }

    fn from_value(name: &'static str, value: Value) -> Self {
        Self {
            name,
            value,
            model: String::new(),
            path: String::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_scalar<T: ScalarValue>(self) -> Result<T, ValidationError> {
        convert_scalar(&self.model, self.path, self.value)
    }

    pub fn into_record<T: EchModel>(self) -> Result<T, ValidationError> {
        convert_record(&self.model, self.path, self.value)
    }

    /// Error for an alternative the enum does not know.
    pub fn unknown<T>(self) -> Result<T, ValidationError> {
        Err(ValidationError::new(
            self.model,
            self.path,
            ValidationReason::UnexpectedElement {
                element: self.name.to_string(),
            },
        ))
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Choice {
            alternative: self.name,
            value: Box::new(self.value),
        }
    }
}

pub(crate) fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path, name)
    }
}

pub(crate) fn index_path(path: &str, name: &str, index: usize) -> String {
    join_path(path, &format!("{}[{}]", name, index + 1))
}

fn convert_scalar<T: ScalarValue>(
    model: &str,
    path: String,
    value: Value,
) -> Result<T, ValidationError> {
    match value {
        Value::Scalar(scalar) => T::from_scalar(scalar).map_err(|e| {
            ValidationError::new(
                model,
                path,
                ValidationReason::TypeMismatch {
                    expected: e.expected.to_string(),
                    found: e.found,
                },
            )
        }),
        other => Err(ValidationError::new(
            model,
            path,
            ValidationReason::type_mismatch("scalar", other.kind_name()),
        )),
    }
}

fn convert_record<T: EchModel>(
    model: &str,
    path: String,
    value: Value,
) -> Result<T, ValidationError> {
    match value {
        Value::Record(record) if record.model() == T::descriptor() => {
            let mut reader = RecordReader::new(record, path);
            T::read(&mut reader)
        }
        Value::Record(record) => Err(ValidationError::new(
            model,
            path,
            ValidationReason::type_mismatch(
                T::descriptor().key().to_string(),
                record.model().key().to_string(),
            ),
        )),
        other => Err(ValidationError::new(
            model,
            path,
            ValidationReason::type_mismatch("record", other.kind_name()),
        )),
    }
}

fn convert_choice<T: EchChoice>(
    model: &str,
    path: String,
    value: Value,
) -> Result<T, ValidationError> {
    match value {
        Value::Choice { alternative, value } => T::read(Alternative {
            name: alternative,
            value: *value,
            model: model.to_string(),
            path: join_path(&path, alternative),
        }),
        other => Err(ValidationError::new(
            model,
            path,
            ValidationReason::type_mismatch("choice", other.kind_name()),
        )),
    }
}

/// Moves field values out of a validated record into a typed model.
pub struct RecordReader {
    record: Record,
    model: String,
    path: String,
}

impl RecordReader {
    pub fn new(record: Record, path: String) -> Self {
        let model = record.model().key().to_string();
        Self {
            record,
            model,
            path,
        }
    }

    pub fn descriptor(&self) -> &'static ModelDescriptor {
        self.record.model()
    }

    fn error(&self, path: String, reason: ValidationReason) -> ValidationError {
        ValidationError::new(self.model.clone(), path, reason)
    }

    fn one(&mut self, name: &str) -> Result<(String, Value), ValidationError> {
        let path = join_path(&self.path, name);
        match self.record.take(name) {
            FieldValue::One(value) => Ok((path, value)),
            FieldValue::Absent => Err(self.error(path, ValidationReason::MissingRequiredField)),
            FieldValue::Many(_) => Err(self.error(
                path,
                ValidationReason::type_mismatch("single value", "sequence"),
            )),
        }
    }

    fn opt(&mut self, name: &str) -> Result<Option<(String, Value)>, ValidationError> {
        let present = self.record.get(name).is_some_and(|v| !v.is_absent());
        if present {
            self.one(name).map(Some)
        } else {
            self.record.take(name);
            Ok(None)
        }
    }

    fn many(&mut self, name: &str) -> Vec<(String, Value)> {
        let values = match self.record.take(name) {
            FieldValue::Absent => Vec::new(),
            FieldValue::One(value) => vec![value],
            FieldValue::Many(values) => values,
        };
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (index_path(&self.path, name, i), v))
            .collect()
    }

    pub fn scalar<T: ScalarValue>(&mut self, name: &str) -> Result<T, ValidationError> {
        let (path, value) = self.one(name)?;
        convert_scalar(&self.model, path, value)
    }

    pub fn opt_scalar<T: ScalarValue>(&mut self, name: &str) -> Result<Option<T>, ValidationError> {
        self.opt(name)?
            .map(|(path, value)| convert_scalar(&self.model, path, value))
            .transpose()
    }

    pub fn scalars<T: ScalarValue>(&mut self, name: &str) -> Result<Vec<T>, ValidationError> {
        self.many(name)
            .into_iter()
            .map(|(path, value)| convert_scalar(&self.model, path, value))
            .collect()
    }

    pub fn record<T: EchModel>(&mut self, name: &str) -> Result<T, ValidationError> {
        let (path, value) = self.one(name)?;
        convert_record(&self.model, path, value)
    }

    pub fn opt_record<T: EchModel>(&mut self, name: &str) -> Result<Option<T>, ValidationError> {
        self.opt(name)?
            .map(|(path, value)| convert_record(&self.model, path, value))
            .transpose()
    }

    pub fn records<T: EchModel>(&mut self, name: &str) -> Result<Vec<T>, ValidationError> {
        self.many(name)
            .into_iter()
            .map(|(path, value)| convert_record(&self.model, path, value))
            .collect()
    }

    pub fn choice<T: EchChoice>(&mut self, name: &str) -> Result<T, ValidationError> {
        let (path, value) = self.one(name)?;
        convert_choice(&self.model, path, value)
    }

    pub fn opt_choice<T: EchChoice>(&mut self, name: &str) -> Result<Option<T>, ValidationError> {
        self.opt(name)?
            .map(|(path, value)| convert_choice(&self.model, path, value))
            .transpose()
    }

    pub fn choices<T: EchChoice>(&mut self, name: &str) -> Result<Vec<T>, ValidationError> {
        self.many(name)
            .into_iter()
            .map(|(path, value)| convert_choice(&self.model, path, value))
            .collect()
    }

    pub fn any(&mut self, name: &str) -> Result<Element, ValidationError> {
        match self.one(name)? {
            (_, Value::Any(element)) => Ok(element),
            (path, other) => Err(self.error(
                path,
                ValidationReason::type_mismatch("any element", other.kind_name()),
            )),
        }
    }

    pub fn opt_any(&mut self, name: &str) -> Result<Option<Element>, ValidationError> {
        match self.opt(name)? {
            None => Ok(None),
            Some((_, Value::Any(element))) => Ok(Some(element)),
            Some((path, other)) => Err(self.error(
                path,
                ValidationReason::type_mismatch("any element", other.kind_name()),
            )),
        }
    }

    pub fn anys(&mut self, name: &str) -> Result<Vec<Element>, ValidationError> {
        self.many(name)
            .into_iter()
            .map(|(path, value)| match value {
                Value::Any(element) => Ok(element),
                other => Err(self.error(
                    path,
                    ValidationReason::type_mismatch("any element", other.kind_name()),
                )),
            })
            .collect()
    }

    pub fn attribute<T: ScalarValue>(&mut self, name: &str) -> Result<T, ValidationError> {
        self.opt_attribute(name)?.ok_or_else(|| {
            self.error(
                join_path(&self.path, &format!("@{}", name)),
                ValidationReason::MissingRequiredField,
            )
        })
    }

    pub fn opt_attribute<T: ScalarValue>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, ValidationError> {
        let path = join_path(&self.path, &format!("@{}", name));
        self.record
            .attribute(name)
            .cloned()
            .map(|scalar| convert_scalar(&self.model, path, Value::Scalar(scalar)))
            .transpose()
    }
}

/// Collects a typed model's field values into a record.
pub struct RecordWriter {
    record: Record,
}

impl RecordWriter {
    pub fn new(model: &'static ModelDescriptor) -> Self {
        Self {
            record: Record::new(model),
        }
    }

    pub fn finish(self) -> Record {
        self.record
    }

    pub fn scalar<T: ScalarValue>(&mut self, name: &'static str, value: &T) {
        self.record
            .set(name, FieldValue::One(Value::Scalar(value.to_scalar())));
    }

    pub fn opt_scalar<T: ScalarValue>(&mut self, name: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            self.scalar(name, value);
        }
    }

    pub fn scalars<T: ScalarValue>(&mut self, name: &'static str, values: &[T]) {
        let values = values.iter().map(|v| Value::Scalar(v.to_scalar())).collect();
        self.record.set(name, FieldValue::Many(values));
    }

    pub fn record<T: EchModel>(&mut self, name: &'static str, value: &T) {
        self.record
            .set(name, FieldValue::One(Value::Record(value.to_record())));
    }

    pub fn opt_record<T: EchModel>(&mut self, name: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            self.record(name, value);
        }
    }

    pub fn records<T: EchModel>(&mut self, name: &'static str, values: &[T]) {
        let values = values
            .iter()
            .map(|v| Value::Record(v.to_record()))
            .collect();
        self.record.set(name, FieldValue::Many(values));
    }

    pub fn choice<T: EchChoice>(&mut self, name: &'static str, value: &T) {
        self.record
            .set(name, FieldValue::One(value.write().into_value()));
    }

    pub fn opt_choice<T: EchChoice>(&mut self, name: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            self.choice(name, value);
        }
    }

    pub fn choices<T: EchChoice>(&mut self, name: &'static str, values: &[T]) {
        let values = values.iter().map(|v| v.write().into_value()).collect();
        self.record.set(name, FieldValue::Many(values));
    }

    pub fn any(&mut self, name: &'static str, element: &Element) {
        self.record
            .set(name, FieldValue::One(Value::Any(element.clone())));
    }

    pub fn opt_any(&mut self, name: &'static str, element: &Option<Element>) {
        if let Some(element) = element {
            self.any(name, element);
        }
    }

    pub fn anys(&mut self, name: &'static str, elements: &[Element]) {
        let values = elements.iter().cloned().map(Value::Any).collect();
        self.record.set(name, FieldValue::Many(values));
    }

    pub fn attribute<T: ScalarValue>(&mut self, name: &'static str, value: &T) {
        self.record.set_attribute(name, value.to_scalar());
    }

    pub fn opt_attribute<T: ScalarValue>(&mut self, name: &'static str, value: &Option<T>) {
        if let Some(value) = value {
            self.attribute(name, value);
        }
    }
}
