use openmun_serde::{
    Catalog, CodecError, EchModel, Element, EnvelopeDescriptor, EnvelopeVersion, EventEnvelope,
    EventFamily, EventVariant, FieldDescriptor, ModelDescriptor, NamespaceEntry,
    NamespaceRegistry, Record, RecordReader, RecordWriter, ScalarKind, SchemaId, ValidationError,
    ValidationReason, unknown_event,
};

const V1: SchemaId = SchemaId::new("eCH-0093", 1);
const V2: SchemaId = SchemaId::new("eCH-0093", 2);

static HEADER: ModelDescriptor = ModelDescriptor {
    schema: V1,
    name: "deliveryType",
    element: "delivery",
    base: None,
    fields: &[
        FieldDescriptor::scalar("messageId", ScalarKind::text(1, 36)),
        FieldDescriptor::scalar("comment", ScalarKind::TEXT).optional(),
    ],
    attributes: &[],
};

static ARRIVAL: ModelDescriptor = ModelDescriptor {
    schema: V1,
    name: "eventArrivalType",
    element: "eventArrival",
    base: None,
    fields: &[FieldDescriptor::scalar("arrivalDate", ScalarKind::Date)],
    attributes: &[],
};

static DEPARTURE: ModelDescriptor = ModelDescriptor {
    schema: V1,
    name: "eventDepartureType",
    element: "eventDeparture",
    base: None,
    fields: &[FieldDescriptor::scalar("departureDate", ScalarKind::Date)],
    attributes: &[],
};

static CORRECTION: ModelDescriptor = ModelDescriptor {
    schema: V2,
    name: "eventCorrectionType",
    element: "eventCorrection",
    base: None,
    fields: &[FieldDescriptor::scalar("reason", ScalarKind::text(1, 100))],
    attributes: &[],
};

static V1_VARIANTS: [EventVariant; 2] = [
    EventVariant {
        tag: "eventArrival",
        model: &ARRIVAL,
    },
    EventVariant {
        tag: "eventDeparture",
        model: &DEPARTURE,
    },
];

// Version 2 dropped eventDeparture and added eventCorrection.
static V2_VARIANTS: [EventVariant; 2] = [
    EventVariant {
        tag: "eventArrival",
        model: &ARRIVAL,
    },
    EventVariant {
        tag: "eventCorrection",
        model: &CORRECTION,
    },
];

static DELIVERY: EnvelopeDescriptor = EnvelopeDescriptor {
    name: "delivery",
    model: &HEADER,
    versions: &[
        EnvelopeVersion {
            schema: V1,
            variants: &V1_VARIANTS,
        },
        EnvelopeVersion {
            schema: V2,
            variants: &V2_VARIANTS,
        },
    ],
};

#[derive(Debug, Clone, PartialEq)]
struct Header {
    message_id: String,
    comment: Option<String>,
}

impl EchModel for Header {
    fn descriptor() -> &'static ModelDescriptor {
        &HEADER
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            message_id: reader.scalar("messageId")?,
            comment: reader.opt_scalar("comment")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("messageId", &self.message_id);
        writer.opt_scalar("comment", &self.comment);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Arrival(chrono::NaiveDate),
    Departure(chrono::NaiveDate),
    Correction(String),
}

impl EventFamily for Event {
    type Envelope = Header;

    fn descriptor() -> &'static EnvelopeDescriptor {
        &DELIVERY
    }

    fn read_event(tag: &str, reader: &mut RecordReader) -> Result<Self, ValidationError> {
        match tag {
            "eventArrival" => Ok(Event::Arrival(reader.scalar("arrivalDate")?)),
            "eventDeparture" => Ok(Event::Departure(reader.scalar("departureDate")?)),
            "eventCorrection" => Ok(Event::Correction(reader.scalar("reason")?)),
            other => unknown_event(&DELIVERY, other),
        }
    }

    fn event_tag(&self) -> &'static str {
        match self {
            Event::Arrival(_) => "eventArrival",
            Event::Departure(_) => "eventDeparture",
            Event::Correction(_) => "eventCorrection",
        }
    }

    fn write_event(&self) -> Record {
        let mut writer;
        match self {
            Event::Arrival(date) => {
                writer = RecordWriter::new(&ARRIVAL);
                writer.scalar("arrivalDate", date);
            }
            Event::Departure(date) => {
                writer = RecordWriter::new(&DEPARTURE);
                writer.scalar("departureDate", date);
            }
            Event::Correction(reason) => {
                writer = RecordWriter::new(&CORRECTION);
                writer.scalar("reason", reason);
            }
        }
        writer.finish()
    }
}

fn catalog() -> Catalog {
    let registry = NamespaceRegistry::new(vec![
        NamespaceEntry::ech(V1).with_prefix("v1"),
        NamespaceEntry::ech(V2).with_prefix("v2"),
    ])
    .unwrap();
    Catalog::builder(registry).envelope(&DELIVERY).build().unwrap()
}

fn document(version: u16, event: &str) -> Element {
    let xml = format!(
        r#"<d:delivery xmlns:d="http://www.ech.ch/xmlns/eCH-0093/{version}">
            <d:messageId>m-1</d:messageId>
            {event}
        </d:delivery>"#
    );
    Element::parse(&xml).unwrap()
}

fn reason(err: CodecError) -> ValidationReason {
    err.as_validation().unwrap().reason.clone()
}

#[test]
fn test_dispatch_selects_variant_by_tag() {
    let catalog = catalog();
    let root = document(1, "<d:eventDeparture><d:departureDate>2024-05-31</d:departureDate></d:eventDeparture>");
    let envelope: EventEnvelope<Event> = catalog.dispatch_document(&root).unwrap();
    assert_eq!(envelope.version, V1);
    assert_eq!(envelope.envelope.message_id, "m-1");
    assert_eq!(envelope.envelope.comment, None);
    assert_eq!(
        envelope.event,
        Event::Departure(chrono::NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
    );

    let exported = catalog.envelope_to_element(&envelope).unwrap();
    assert!(catalog.verify(&root, &exported).is_lossless);
}

#[test]
fn test_variant_set_depends_on_version() {
    let catalog = catalog();
    let correction = "<d:eventCorrection><d:reason>typo</d:reason></d:eventCorrection>";

    let envelope: EventEnvelope<Event> = catalog.dispatch_document(&document(2, correction)).unwrap();
    assert_eq!(envelope.version, V2);
    assert_eq!(envelope.event, Event::Correction("typo".into()));

    let err = catalog
        .dispatch_document::<Event>(&document(1, correction))
        .unwrap_err();
    assert_eq!(
        reason(err),
        ValidationReason::UnknownEventType {
            tag: "{http://www.ech.ch/xmlns/eCH-0093/1}eventCorrection".into()
        }
    );

    let departure =
        "<d:eventDeparture><d:departureDate>2024-05-31</d:departureDate></d:eventDeparture>";
    let err = catalog
        .dispatch_document::<Event>(&document(2, departure))
        .unwrap_err();
    assert_eq!(reason(err).code(), "UnknownEventType");
}

#[test]
fn test_shared_variant_follows_the_envelope_version() {
    let catalog = catalog();
    let arrival = "<d:eventArrival><d:arrivalDate>2024-01-15</d:arrivalDate></d:eventArrival>";
    let root = document(2, arrival);
    let dispatched = catalog.dispatch_record(&DELIVERY, &root, V2).unwrap();
    assert_eq!(dispatched.tag, "eventArrival");

    let exported = catalog.dispatched_to_element(&DELIVERY, &dispatched).unwrap();
    let event = exported.child("eventArrival").unwrap();
    assert_eq!(event.name.namespace, V2.canonical_uri());
    assert_eq!(event.children[0].name.namespace, V2.canonical_uri());
    assert!(catalog.verify(&root, &exported).is_lossless);
}

#[test]
fn test_unknown_event_type() {
    let catalog = catalog();
    let root = document(1, "<d:eventBirth><d:birthDate>2024-01-01</d:birthDate></d:eventBirth>");
    let err = catalog.dispatch::<Event>(&root, V1).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.code(), "UnknownEventType");
    assert_eq!(validation.model, "eCH-0093/1:deliveryType");
}

#[test]
fn test_invalid_variant_fails_the_envelope() {
    let catalog = catalog();
    let root = document(1, "<d:eventArrival><d:arrivalDate>soon</d:arrivalDate></d:eventArrival>");
    let err = catalog.dispatch::<Event>(&root, V1).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert!(matches!(validation.reason, ValidationReason::TypeMismatch { .. }));
    assert_eq!(validation.path, "eventArrival/arrivalDate");
}

#[test]
fn test_envelope_needs_exactly_one_event() {
    let catalog = catalog();
    let err = catalog.dispatch::<Event>(&document(1, ""), V1).unwrap_err();
    assert_eq!(reason(err), ValidationReason::MissingRequiredField);

    let arrival = "<d:eventArrival><d:arrivalDate>2024-01-15</d:arrivalDate></d:eventArrival>";
    let twice = format!("{arrival}{arrival}");
    let err = catalog.dispatch::<Event>(&document(1, &twice), V1).unwrap_err();
    assert_eq!(reason(err).code(), "UnexpectedElement");
}

#[test]
fn test_unsupported_version() {
    let catalog = catalog();
    let root = Element::parse(
        r#"<d:delivery xmlns:d="http://www.ech.ch/xmlns/eCH-0093/3"><d:messageId>m</d:messageId></d:delivery>"#,
    )
    .unwrap();
    let err = catalog.dispatch_document::<Event>(&root).unwrap_err();
    assert_eq!(reason(err).code(), "UnsupportedVersion");
}

#[test]
fn test_envelope_round_trip_through_typed_values() {
    let catalog = catalog();
    let envelope = EventEnvelope {
        version: V2,
        envelope: Header {
            message_id: "m-2".into(),
            comment: Some("manual".into()),
        },
        event: Event::Correction("wrong birth date".into()),
    };
    let xml = catalog.envelope_to_xml_string(&envelope).unwrap();
    assert!(xml.contains("xmlns:v2=\"http://www.ech.ch/xmlns/eCH-0093/2\""));

    let root = Element::parse(&xml).unwrap();
    let back: EventEnvelope<Event> = catalog.dispatch_document(&root).unwrap();
    assert_eq!(back, envelope);
}

#[test]
fn test_event_must_match_its_version() {
    let catalog = catalog();
    let envelope = EventEnvelope {
        version: V1,
        envelope: Header {
            message_id: "m-3".into(),
            comment: None,
        },
        event: Event::Correction("not in v1".into()),
    };
    let err = catalog.envelope_to_element(&envelope).unwrap_err();
    assert_eq!(reason(err).code(), "UnknownEventType");
}
