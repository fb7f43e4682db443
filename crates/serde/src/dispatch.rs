//! Event envelopes: one fixed header part followed by exactly one event
//! element chosen from a closed, per-version variant table.
//!
//! The variant set is data compiled into the catalog. A new event type is a
//! new [`EventVariant`] entry plus its model, never a runtime registration.

use std::fmt;
use std::ptr;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Result, SchemaDefinitionError, ValidationError, ValidationReason};
use crate::record::{EchModel, Record, RecordReader};
use crate::schema::{ModelDescriptor, NamespaceRegistry, SchemaId};
use crate::xml::de::{Deserializer, expect_end, invalid};
use crate::xml::ser::Serializer;
use crate::xml::Element;

/// One event payload type, selected by its element tag.
#[derive(Debug)]
pub struct EventVariant {
    pub tag: &'static str,
    pub model: &'static ModelDescriptor,
}

/// The variants valid under one schema version of the envelope.
#[derive(Debug)]
pub struct EnvelopeVersion {
    pub schema: SchemaId,
    pub variants: &'static [EventVariant],
}

/// An envelope family: the model of its fixed fields plus the variant table
/// of every supported version.
#[derive(Debug)]
pub struct EnvelopeDescriptor {
    pub name: &'static str,
    pub model: &'static ModelDescriptor,
    pub versions: &'static [EnvelopeVersion],
}

impl EnvelopeDescriptor {
    pub fn version(&self, schema: SchemaId) -> Option<&'static EnvelopeVersion> {
        self.versions.iter().find(|v| v.schema == schema)
    }

    pub fn supports(&self, schema: SchemaId) -> bool {
        self.version(schema).is_some()
    }

    pub(crate) fn validate(
        &self,
        registry: &NamespaceRegistry,
    ) -> std::result::Result<(), SchemaDefinitionError> {
        for (index, version) in self.versions.iter().enumerate() {
            if !registry.contains(version.schema) {
                return Err(SchemaDefinitionError::UnregisteredNamespace {
                    model: self.name.to_string(),
                    schema: version.schema.to_string(),
                });
            }
            if self.versions[..index].iter().any(|v| v.schema == version.schema) {
                return Err(SchemaDefinitionError::DuplicateVariant {
                    envelope: self.name.to_string(),
                    schema: version.schema.to_string(),
                    tag: "*".to_string(),
                });
            }
            for (i, variant) in version.variants.iter().enumerate() {
                if version.variants[..i].iter().any(|v| v.tag == variant.tag) {
                    return Err(SchemaDefinitionError::DuplicateVariant {
                        envelope: self.name.to_string(),
                        schema: version.schema.to_string(),
                        tag: variant.tag.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A closed set of event payloads mapped onto a Rust enum.
pub trait EventFamily: fmt::Debug + Clone + PartialEq + Sized {
    /// Typed form of the envelope's fixed fields.
    type Envelope: EchModel + fmt::Debug + Clone + PartialEq;

    fn descriptor() -> &'static EnvelopeDescriptor;

    fn read_event(tag: &str, reader: &mut RecordReader) -> std::result::Result<Self, ValidationError>;

    fn event_tag(&self) -> &'static str;

    fn write_event(&self) -> Record;
}

/// A parsed envelope. The variant is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope<E: EventFamily> {
    pub version: SchemaId,
    pub envelope: E::Envelope,
    pub event: E,
}

/// Untyped result of [`Catalog::dispatch_record`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedRecord {
    pub version: SchemaId,
    pub envelope: Record,
    pub tag: &'static str,
    pub event: Record,
}

/// Error for an event tag an [`EventFamily`] implementation does not map.
pub fn unknown_event<T>(family: &EnvelopeDescriptor, tag: &str) -> std::result::Result<T, ValidationError> {
    Err(ValidationError::new(
        family.model.key().to_string(),
        tag,
        ValidationReason::UnknownEventType {
            tag: tag.to_string(),
        },
    ))
}

impl Catalog {
    /// The envelope version named by the root element's namespace.
    pub fn detect_version(&self, envelope: &EnvelopeDescriptor, root: &Element) -> Result<SchemaId> {
        match self.registry().schema_for(&root.name.namespace) {
            Some(schema) if envelope.supports(schema) => Ok(schema),
            _ => Err(invalid(
                envelope.model,
                "",
                ValidationReason::UnsupportedVersion {
                    version: root.name.namespace.clone(),
                },
            )),
        }
    }

    /// Reads the envelope's fixed fields, then selects the one event variant
    /// by the next child's tag under `version`.
    pub fn dispatch_record(
        &self,
        envelope: &'static EnvelopeDescriptor,
        element: &Element,
        version: SchemaId,
    ) -> Result<DispatchedRecord> {
        let model = envelope.model;
        self.require_envelope(envelope)?;
        let table = self.version_table(envelope, version)?;
        debug!(envelope = envelope.name, version = %version, "Dispatching envelope");

        let de = Deserializer::new(self);
        let (record, cursor) = de.read_prefix(element, model, version, "")?;

        let Some(child) = element.children.get(cursor) else {
            return Err(invalid(model, "event", ValidationReason::MissingRequiredField));
        };
        let in_version = self.registry().schema_for(&child.name.namespace) == Some(version);
        let Some(variant) = table
            .variants
            .iter()
            .find(|v| in_version && v.tag == child.name.local)
        else {
            return Err(invalid(
                model,
                &child.name.local,
                ValidationReason::UnknownEventType {
                    tag: child.name.to_string(),
                },
            ));
        };

        let event = de.read_model(child, variant.model, version, variant.tag)?;
        expect_end(&element.children, cursor + 1, model, "")?;
        debug!(envelope = envelope.name, event = variant.tag, "Dispatched event");

        Ok(DispatchedRecord {
            version,
            envelope: record,
            tag: variant.tag,
            event,
        })
    }

    /// Inverse of [`Catalog::dispatch_record`].
    pub fn dispatched_to_element(
        &self,
        envelope: &'static EnvelopeDescriptor,
        dispatched: &DispatchedRecord,
    ) -> Result<Element> {
        self.require_envelope(envelope)?;
        let table = self.version_table(envelope, dispatched.version)?;
        let Some(variant) = table.variants.iter().find(|v| v.tag == dispatched.tag) else {
            return Err(invalid(
                envelope.model,
                dispatched.tag,
                ValidationReason::UnknownEventType {
                    tag: dispatched.tag.to_string(),
                },
            ));
        };

        let ser = Serializer::new(self);
        let name = self
            .registry()
            .qualify(envelope.model.element, dispatched.version)?;
        let mut root = ser.write_model(
            &dispatched.envelope,
            envelope.model,
            dispatched.version,
            name,
            "",
        )?;
        let event_name = self.registry().qualify(variant.tag, dispatched.version)?;
        let event = ser.write_model(
            &dispatched.event,
            variant.model,
            dispatched.version,
            event_name,
            variant.tag,
        )?;
        root.children.push(event);
        Ok(root)
    }

    pub fn dispatch<E: EventFamily>(&self, element: &Element, version: SchemaId) -> Result<EventEnvelope<E>> {
        let envelope = E::descriptor();
        if E::Envelope::descriptor() != envelope.model {
            return Err(SchemaDefinitionError::UnregisteredModel(
                E::Envelope::descriptor().key().to_string(),
            )
            .into());
        }
        let dispatched = self.dispatch_record(envelope, element, version)?;
        let header = E::Envelope::from_record(dispatched.envelope)?;
        let mut reader = RecordReader::new(dispatched.event, dispatched.tag.to_string());
        let event = E::read_event(dispatched.tag, &mut reader)?;
        Ok(EventEnvelope {
            version: dispatched.version,
            envelope: header,
            event,
        })
    }

    /// Detects the version from the root namespace, then dispatches.
    pub fn dispatch_document<E: EventFamily>(&self, root: &Element) -> Result<EventEnvelope<E>> {
        let version = self.detect_version(E::descriptor(), root)?;
        self.dispatch(root, version)
    }

    pub fn envelope_to_element<E: EventFamily>(&self, envelope: &EventEnvelope<E>) -> Result<Element> {
        let dispatched = DispatchedRecord {
            version: envelope.version,
            envelope: envelope.envelope.to_record(),
            tag: envelope.event.event_tag(),
            event: envelope.event.write_event(),
        };
        self.dispatched_to_element(E::descriptor(), &dispatched)
    }

    pub fn envelope_to_xml_string<E: EventFamily>(&self, envelope: &EventEnvelope<E>) -> Result<String> {
        let root = self.envelope_to_element(envelope)?;
        self.write_document(&root)
    }

    fn require_envelope(&self, envelope: &'static EnvelopeDescriptor) -> Result<()> {
        if self.envelopes().iter().any(|e| ptr::eq(*e, envelope)) {
            Ok(())
        } else {
            Err(SchemaDefinitionError::UnregisteredModel(envelope.name.to_string()).into())
        }
    }

    fn version_table(
        &self,
        envelope: &EnvelopeDescriptor,
        version: SchemaId,
    ) -> Result<&'static EnvelopeVersion> {
        envelope.version(version).ok_or_else(|| {
            invalid(
                envelope.model,
                "",
                ValidationReason::UnsupportedVersion {
                    version: version.to_string(),
                },
            )
        })
    }
}
