//! The validated, immutable set of model types a process works with.
//!
//! A [`Catalog`] is built once from a [`NamespaceRegistry`] plus the root
//! model and envelope descriptors. Building walks every reachable model,
//! resolves extension chains, checks wrapper, choice and sequence rules and
//! compiles pattern facets. Any defect aborts the build, so a catalog that
//! exists is known to be sound, and all codec entry points hang off it.

use std::collections::HashMap;
use std::ptr;

use tracing::debug;

use crate::dispatch::EnvelopeDescriptor;
use crate::error::{Result, SchemaDefinitionError};
use crate::record::{EchModel, Record};
use crate::schema::{
    Cardinality, Content, FieldDescriptor, ModelDescriptor, ModelKey, NamespaceRegistry,
    PatternSet, ResolvedField, ScalarKind, SchemaId, Wrapper, element_namespace, field_namespace,
    inherit_namespace, resolve_fields,
};
use crate::verify::{self, RoundTripReport};
use crate::xml::de::Deserializer;
use crate::xml::ser::Serializer;
use crate::xml::{Element, NamespaceBindings, write_document};

/// Nesting limit for skip-wrapper expansion while checking sequences.
const MAX_SKIP_DEPTH: usize = 16;

/// Overrides for writing a record as a standalone element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions<'a> {
    /// Namespace of the model's own fields instead of the model's schema.
    pub namespace: Option<SchemaId>,
    /// Element name instead of the model's default element name.
    pub element_name: Option<&'a str>,
    /// Namespace of the element itself when it differs from its content.
    pub wrapper_namespace: Option<SchemaId>,
    /// Append the fields directly into the parent, without an element layer.
    pub skip_wrapper: bool,
}

#[derive(Debug)]
struct CompiledModel {
    descriptor: &'static ModelDescriptor,
    fields: Vec<ResolvedField>,
}

/// Process-wide model catalog. Read-only after [`CatalogBuilder::build`].
#[derive(Debug)]
pub struct Catalog {
    registry: NamespaceRegistry,
    models: HashMap<ModelKey, CompiledModel>,
    patterns: PatternSet,
    envelopes: Vec<&'static EnvelopeDescriptor>,
}

pub struct CatalogBuilder {
    registry: NamespaceRegistry,
    models: Vec<&'static ModelDescriptor>,
    envelopes: Vec<&'static EnvelopeDescriptor>,
}

impl CatalogBuilder {
    /// Adds a root model. Every model reachable from it is added too.
    pub fn model(mut self, model: &'static ModelDescriptor) -> Self {
        self.models.push(model);
        self
    }

    pub fn models(mut self, models: impl IntoIterator<Item = &'static ModelDescriptor>) -> Self {
        self.models.extend(models);
        self
    }

    /// Adds an event envelope with all its variant models.
    pub fn envelope(mut self, envelope: &'static EnvelopeDescriptor) -> Self {
        self.envelopes.push(envelope);
        self
    }

    pub fn build(self) -> std::result::Result<Catalog, SchemaDefinitionError> {
        let mut catalog = Catalog {
            registry: self.registry,
            models: HashMap::new(),
            patterns: PatternSet::default(),
            envelopes: Vec::new(),
        };

        let mut pending = self.models;
        for envelope in self.envelopes {
            envelope.validate(&catalog.registry)?;
            pending.push(envelope.model);
            pending.extend(
                envelope
                    .versions
                    .iter()
                    .flat_map(|v| v.variants.iter().map(|variant| variant.model)),
            );
            catalog.envelopes.push(envelope);
        }

        while let Some(model) = pending.pop() {
            if let Some(existing) = catalog.models.get(&model.key()) {
                if !ptr::eq(existing.descriptor, model) {
                    return Err(SchemaDefinitionError::DuplicateModel(model.key().to_string()));
                }
                continue;
            }
            catalog.compile(model, &mut pending)?;
        }

        // Skip wrappers splice nested sequences in, so this needs every
        // model compiled first.
        for compiled in catalog.models.values() {
            catalog.check_sequence(compiled.descriptor)?;
        }
        for envelope in &catalog.envelopes {
            catalog.check_envelope_fields(envelope)?;
        }

        debug!(
            models = catalog.models.len(),
            namespaces = catalog.registry.entries().len(),
            envelopes = catalog.envelopes.len(),
            "Catalog built"
        );
        Ok(catalog)
    }
}

struct Slot {
    field: &'static str,
    tags: Vec<(SchemaId, &'static str)>,
    cardinality: Cardinality,
    choice: bool,
}

impl Catalog {
    pub fn builder(registry: NamespaceRegistry) -> CatalogBuilder {
        CatalogBuilder {
            registry,
            models: Vec::new(),
            envelopes: Vec::new(),
        }
    }

    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    pub fn envelopes(&self) -> &[&'static EnvelopeDescriptor] {
        &self.envelopes
    }

    pub fn contains(&self, model: &'static ModelDescriptor) -> bool {
        self.models
            .get(&model.key())
            .is_some_and(|c| ptr::eq(c.descriptor, model))
    }

    /// The flattened, base-first field list of a registered model.
    pub fn resolve_fields(
        &self,
        model: &'static ModelDescriptor,
    ) -> std::result::Result<&[ResolvedField], SchemaDefinitionError> {
        match self.models.get(&model.key()) {
            Some(compiled) if ptr::eq(compiled.descriptor, model) => Ok(&compiled.fields),
            _ => Err(SchemaDefinitionError::UnregisteredModel(model.key().to_string())),
        }
    }

    pub(crate) fn fields(
        &self,
        model: &'static ModelDescriptor,
    ) -> std::result::Result<&[ResolvedField], SchemaDefinitionError> {
        self.resolve_fields(model)
    }

    pub(crate) fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Reads `element` as `model`. The element's own tag is not checked;
    /// its attributes and children must match the model exactly.
    pub fn read_record(
        &self,
        element: &Element,
        model: &'static ModelDescriptor,
        namespace: Option<SchemaId>,
    ) -> Result<Record> {
        let namespace = namespace.unwrap_or(model.schema);
        debug!(model = %model.key(), element = %element.name, "Reading record");
        self.fields(model)?;
        Deserializer::new(self).read_model(element, model, namespace, "")
    }

    /// Builds the standalone element for `record`.
    pub fn record_to_element(&self, record: &Record, options: &SerializeOptions<'_>) -> Result<Element> {
        let model = record.model();
        if options.skip_wrapper {
            return Err(SchemaDefinitionError::InvalidWrapper {
                model: model.key().to_string(),
                field: model.element.to_string(),
                reason: "skip_wrapper needs a parent element".to_string(),
            }
            .into());
        }
        self.fields(model)?;
        let namespace = options.namespace.unwrap_or(model.schema);
        let name = self.registry.qualify(
            options.element_name.unwrap_or(model.element),
            options.wrapper_namespace.unwrap_or(namespace),
        )?;
        Serializer::new(self).write_model(record, model, namespace, name, "")
    }

    /// Appends `record` to `parent`. On error `parent` is unchanged.
    pub fn write_record(
        &self,
        record: &Record,
        parent: &mut Element,
        options: &SerializeOptions<'_>,
    ) -> Result<()> {
        let model = record.model();
        debug!(model = %model.key(), parent = %parent.name, "Writing record");
        if !options.skip_wrapper {
            let element = self.record_to_element(record, options)?;
            parent.children.push(element);
            return Ok(());
        }

        if !model.attributes.is_empty() {
            return Err(SchemaDefinitionError::InvalidWrapper {
                model: model.key().to_string(),
                field: model.element.to_string(),
                reason: "a model with attributes needs its own element".to_string(),
            }
            .into());
        }
        let namespace = options.namespace.unwrap_or(model.schema);
        let mut fragment = Vec::new();
        Serializer::new(self).write_fields(record, model, namespace, "", &mut fragment)?;
        parent.children.extend(fragment);
        Ok(())
    }

    pub fn from_xml<T: EchModel>(&self, element: &Element) -> Result<T> {
        let record = self.read_record(element, T::descriptor(), None)?;
        Ok(T::from_record(record)?)
    }

    pub fn from_xml_in<T: EchModel>(&self, element: &Element, namespace: SchemaId) -> Result<T> {
        let record = self.read_record(element, T::descriptor(), Some(namespace))?;
        Ok(T::from_record(record)?)
    }

    pub fn from_xml_str<T: EchModel>(&self, xml: &str) -> Result<T> {
        let root = Element::parse(xml)?;
        self.from_xml(&root)
    }

    /// Appends `value` to `parent` as its element (or its bare fields with
    /// `skip_wrapper`).
    pub fn to_xml<T: EchModel>(
        &self,
        value: &T,
        parent: &mut Element,
        options: &SerializeOptions<'_>,
    ) -> Result<()> {
        self.write_record(&value.to_record(), parent, options)
    }

    /// Appends all values in order, or nothing if any of them fails.
    pub fn to_xml_many<T: EchModel>(
        &self,
        values: &[T],
        parent: &mut Element,
        options: &SerializeOptions<'_>,
    ) -> Result<()> {
        let mut staged = Element::new(parent.name.clone());
        for value in values {
            self.to_xml(value, &mut staged, options)?;
        }
        parent.children.extend(staged.children);
        Ok(())
    }

    pub fn to_element<T: EchModel>(&self, value: &T, options: &SerializeOptions<'_>) -> Result<Element> {
        self.record_to_element(&value.to_record(), options)
    }

    pub fn to_xml_string<T: EchModel>(&self, value: &T, options: &SerializeOptions<'_>) -> Result<String> {
        let root = self.to_element(value, options)?;
        self.write_document(&root)
    }

    /// Writes a tree as a document, declaring registry prefixes on the root.
    pub fn write_document(&self, root: &Element) -> Result<String> {
        let preferred = |uri: &str| self.registry.prefix_for_uri(uri).map(str::to_string);
        let bindings = NamespaceBindings::for_tree(root, &preferred);
        Ok(write_document(root, &bindings)?)
    }

    /// Runs a constructed value through the same checks a parsed document
    /// gets: it is serialized and the result read back.
    pub fn validate<T: EchModel>(&self, value: &T) -> Result<()> {
        let element = self.to_element(value, &SerializeOptions::default())?;
        self.read_record(&element, T::descriptor(), None)?;
        Ok(())
    }

    /// Returns `value` only if it passes [`Catalog::validate`].
    pub fn construct<T: EchModel>(&self, value: T) -> Result<T> {
        self.validate(&value)?;
        Ok(value)
    }

    /// Structural comparison with alias namespaces folded onto their
    /// canonical URI.
    pub fn verify(&self, original: &Element, exported: &Element) -> RoundTripReport {
        verify::diff_by(original, exported, |name| self.registry.canonical(name))
    }

    fn compile(
        &mut self,
        model: &'static ModelDescriptor,
        pending: &mut Vec<&'static ModelDescriptor>,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        self.require_namespace(model, model.schema)?;
        let fields = resolve_fields(model)?;
        if let Some(base) = model.base {
            pending.push(base);
        }
        for attribute in model.attributes {
            self.compile_pattern(model, attribute.name, attribute.kind)?;
        }
        for resolved in &fields {
            self.check_field(model, resolved, pending)?;
        }
        self.models.insert(
            model.key(),
            CompiledModel {
                descriptor: model,
                fields,
            },
        );
        Ok(())
    }

    fn check_field(
        &mut self,
        model: &'static ModelDescriptor,
        resolved: &ResolvedField,
        pending: &mut Vec<&'static ModelDescriptor>,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        let field = resolved.field;
        let declaring = resolved.declared_in.schema;
        let owner = inherit_namespace(declaring, model.schema, model.schema);
        let target = field_namespace(field, declaring, owner);
        let invalid_choice = |reason: String| SchemaDefinitionError::InvalidChoice {
            model: model.key().to_string(),
            field: field.name.to_string(),
            reason,
        };

        if let Some(namespace) = field.namespace {
            self.require_namespace(model, namespace)?;
        }

        self.check_wrapper(model, field, target)?;

        match field.content {
            Content::Scalar(kind) => self.compile_pattern(model, field.name, kind)?,
            Content::Model(nested) => pending.push(nested),
            Content::Any => {}
            Content::Choice(alternatives) => {
                if alternatives.is_empty() {
                    return Err(invalid_choice("no alternatives".to_string()));
                }
                let mut seen: Vec<(SchemaId, &str)> = Vec::new();
                for alt in alternatives {
                    if alt.cardinality != Cardinality::One || alt.wrapper == Wrapper::Skip {
                        return Err(invalid_choice(format!(
                            "alternative '{}' must be a single element",
                            alt.name
                        )));
                    }
                    if let Some(namespace) = alt.namespace {
                        self.require_namespace(model, namespace)?;
                    }
                    let alt_namespace = field_namespace(alt, declaring, target);
                    self.check_wrapper(model, alt, alt_namespace)?;
                    match alt.content {
                        Content::Choice(_) => {
                            return Err(invalid_choice(format!(
                                "alternative '{}' is itself a choice",
                                alt.name
                            )));
                        }
                        Content::Scalar(kind) => self.compile_pattern(model, alt.name, kind)?,
                        Content::Model(nested) => pending.push(nested),
                        Content::Any => {}
                    }
                    let tag = (element_namespace(alt, alt_namespace), alt.name);
                    if seen.contains(&tag) {
                        return Err(invalid_choice(format!(
                            "alternative '{}' is listed twice",
                            alt.name
                        )));
                    }
                    seen.push(tag);
                }
            }
        }
        Ok(())
    }

    /// `target` is the namespace of the field's content.
    fn check_wrapper(
        &self,
        model: &'static ModelDescriptor,
        field: &'static FieldDescriptor,
        target: SchemaId,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        let invalid_wrapper = |reason: &str| SchemaDefinitionError::InvalidWrapper {
            model: model.key().to_string(),
            field: field.name.to_string(),
            reason: reason.to_string(),
        };

        match field.wrapper {
            Wrapper::None => Ok(()),
            Wrapper::Skip => match (field.content, field.cardinality) {
                (Content::Model(nested), Cardinality::One) if nested.attributes.is_empty() => Ok(()),
                _ => Err(invalid_wrapper(
                    "skip-wrapper needs a required single model field without attributes",
                )),
            },
            Wrapper::Namespaced(wrapper) => {
                self.require_namespace(model, wrapper)?;
                if !matches!(field.content, Content::Model(_) | Content::Any) {
                    return Err(invalid_wrapper("a namespaced wrapper needs element content"));
                }
                if wrapper == target {
                    return Err(SchemaDefinitionError::AmbiguousWrapper {
                        model: model.key().to_string(),
                        field: field.name.to_string(),
                        namespace: wrapper.to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    fn require_namespace(
        &self,
        model: &ModelDescriptor,
        schema: SchemaId,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        if self.registry.contains(schema) {
            Ok(())
        } else {
            Err(SchemaDefinitionError::UnregisteredNamespace {
                model: model.key().to_string(),
                schema: schema.to_string(),
            })
        }
    }

    fn compile_pattern(
        &mut self,
        model: &ModelDescriptor,
        field: &str,
        kind: ScalarKind,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        let Some(pattern) = kind.pattern_str() else {
            return Ok(());
        };
        self.patterns
            .compile(pattern)
            .map_err(|e| SchemaDefinitionError::InvalidPattern {
                model: model.key().to_string(),
                field: field.to_string(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Rejects sequences where the cursor could not tell which field an
    /// element belongs to: an optional or repeated field followed, before
    /// the next required single field, by a field accepting the same tag.
    /// A single choice counts as open too, since a second alternative right
    /// after it is read as a duplicate choice.
    fn check_sequence(
        &self,
        model: &'static ModelDescriptor,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        let mut slots = Vec::new();
        self.sequence_slots(model, model.schema, 0, &mut slots)?;

        let mut open: Vec<((SchemaId, &'static str), &'static str)> = Vec::new();
        for slot in &slots {
            for tag in &slot.tags {
                if let Some((_, previous)) = open.iter().find(|(t, _)| t == tag) {
                    return Err(SchemaDefinitionError::AmbiguousSequence {
                        model: model.key().to_string(),
                        field: slot.field.to_string(),
                        previous: previous.to_string(),
                    });
                }
            }
            match slot.cardinality {
                Cardinality::One => open.clear(),
                Cardinality::Optional => {}
                Cardinality::Many { min } if min > 0 => open.clear(),
                Cardinality::Many { .. } => {}
            }
            if slot.cardinality != Cardinality::One || slot.choice {
                open.extend(slot.tags.iter().map(|tag| (*tag, slot.field)));
            }
        }
        Ok(())
    }

    /// Variant tags must not be accepted by any of the envelope's own
    /// fields, inherited and skip-wrapped ones included.
    fn check_envelope_fields(
        &self,
        envelope: &'static EnvelopeDescriptor,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        for version in envelope.versions {
            let mut slots = Vec::new();
            self.sequence_slots(envelope.model, version.schema, 0, &mut slots)?;
            let clash = version.variants.iter().find(|variant| {
                slots
                    .iter()
                    .any(|slot| slot.tags.iter().any(|(_, local)| *local == variant.tag))
            });
            if let Some(variant) = clash {
                return Err(SchemaDefinitionError::DuplicateVariant {
                    envelope: envelope.name.to_string(),
                    schema: version.schema.to_string(),
                    tag: variant.tag.to_string(),
                });
            }
        }
        Ok(())
    }

    fn sequence_slots(
        &self,
        model: &'static ModelDescriptor,
        namespace: SchemaId,
        depth: usize,
        out: &mut Vec<Slot>,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        if depth > MAX_SKIP_DEPTH {
            return Err(SchemaDefinitionError::InvalidWrapper {
                model: model.key().to_string(),
                field: model.element.to_string(),
                reason: "skip-wrappers nest without end".to_string(),
            });
        }
        for resolved in self.fields(model)? {
            let field = resolved.field;
            let declaring = resolved.declared_in.schema;
            let owner = inherit_namespace(declaring, model.schema, namespace);
            let target = field_namespace(field, declaring, owner);

            if let (Wrapper::Skip, Content::Model(nested)) = (field.wrapper, field.content) {
                self.sequence_slots(nested, target, depth + 1, out)?;
                continue;
            }

            let tags = match field.content {
                Content::Choice(alternatives) => alternatives
                    .iter()
                    .map(|alt| {
                        let content = field_namespace(alt, declaring, target);
                        (element_namespace(alt, content), alt.name)
                    })
                    .collect(),
                _ => vec![(element_namespace(field, target), field.name)],
            };
            out.push(Slot {
                field: field.name,
                tags,
                cardinality: field.cardinality,
                choice: matches!(field.content, Content::Choice(_)),
            });
        }
        Ok(())
    }
}
