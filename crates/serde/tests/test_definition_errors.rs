use openmun_serde::{
    Catalog, EnvelopeDescriptor, EnvelopeVersion, EventVariant, FieldDescriptor, ModelDescriptor,
    NamespaceEntry, NamespaceRegistry, SchemaDefinitionError, ScalarKind, SchemaId,
};

const A: SchemaId = SchemaId::new("eCH-0010", 5);
const B: SchemaId = SchemaId::new("eCH-0044", 4);
const UNKNOWN: SchemaId = SchemaId::new("eCH-0999", 1);

fn registry() -> NamespaceRegistry {
    NamespaceRegistry::new(vec![NamespaceEntry::ech(A), NamespaceEntry::ech(B)]).unwrap()
}

fn build(model: &'static ModelDescriptor) -> Result<Catalog, SchemaDefinitionError> {
    Catalog::builder(registry()).model(model).build()
}

static LEAF: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "leafType",
    element: "leaf",
    base: None,
    fields: &[FieldDescriptor::scalar("town", ScalarKind::TEXT)],
    attributes: &[],
};

static CYCLE_A: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "cycleAType",
    element: "cycleA",
    base: Some(&CYCLE_B),
    fields: &[],
    attributes: &[],
};

static CYCLE_B: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "cycleBType",
    element: "cycleB",
    base: Some(&CYCLE_A),
    fields: &[],
    attributes: &[],
};

static SHADOWING: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "shadowingType",
    element: "shadowing",
    base: Some(&LEAF),
    fields: &[FieldDescriptor::scalar("town", ScalarKind::TEXT)],
    attributes: &[],
};

static SAME_NAMESPACE_WRAPPER: ModelDescriptor = ModelDescriptor {
    schema: B,
    name: "holderType",
    element: "holder",
    base: None,
    fields: &[FieldDescriptor::model("address", &LEAF).wrapped_in(A)],
    attributes: &[],
};

static SCALAR_WRAPPER: ModelDescriptor = ModelDescriptor {
    schema: B,
    name: "scalarHolderType",
    element: "scalarHolder",
    base: None,
    fields: &[FieldDescriptor::scalar("town", ScalarKind::TEXT).wrapped_in(A)],
    attributes: &[],
};

static OPTIONAL_SKIP: ModelDescriptor = ModelDescriptor {
    schema: B,
    name: "optionalSkipType",
    element: "optionalSkip",
    base: None,
    fields: &[FieldDescriptor::model("address", &LEAF).skip_wrapper().optional()],
    attributes: &[],
};

static UNREGISTERED: ModelDescriptor = ModelDescriptor {
    schema: UNKNOWN,
    name: "strayType",
    element: "stray",
    base: None,
    fields: &[],
    attributes: &[],
};

static BAD_PATTERN: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "badPatternType",
    element: "badPattern",
    base: None,
    fields: &[FieldDescriptor::scalar("code", ScalarKind::pattern("[0-9"))],
    attributes: &[],
};

static ADDRESS_LINE: [FieldDescriptor; 1] =
    [FieldDescriptor::scalar("addressLine", ScalarKind::TEXT)];

static AMBIGUOUS_SEQUENCE: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "ambiguousSequenceType",
    element: "ambiguousSequence",
    base: None,
    fields: &[
        FieldDescriptor::choice("firstLine", &ADDRESS_LINE).many(),
        FieldDescriptor::scalar("addressLine", ScalarKind::TEXT),
    ],
    attributes: &[],
};

static SEPARATED_SEQUENCE: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "separatedSequenceType",
    element: "separatedSequence",
    base: None,
    fields: &[
        FieldDescriptor::choice("firstLine", &ADDRESS_LINE).optional(),
        FieldDescriptor::scalar("town", ScalarKind::TEXT),
        FieldDescriptor::scalar("addressLine", ScalarKind::TEXT).optional(),
    ],
    attributes: &[],
};

static CHOICE_THEN_ALTERNATIVE: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "choiceThenAlternativeType",
    element: "choiceThenAlternative",
    base: None,
    fields: &[
        FieldDescriptor::choice("firstLine", &ADDRESS_LINE),
        FieldDescriptor::scalar("addressLine", ScalarKind::TEXT).optional(),
    ],
    attributes: &[],
};

static WRAPPED_ALTERNATIVES: [FieldDescriptor; 2] = [
    FieldDescriptor::model("address", &LEAF).wrapped_in(B),
    FieldDescriptor::scalar("unknown", ScalarKind::TEXT),
];

static WRAPPED_CHOICE: ModelDescriptor = ModelDescriptor {
    schema: B,
    name: "wrappedChoiceType",
    element: "wrappedChoice",
    base: None,
    fields: &[FieldDescriptor::choice("place", &WRAPPED_ALTERNATIVES)],
    attributes: &[],
};

static SKIPPED_ALTERNATIVES: [FieldDescriptor; 1] =
    [FieldDescriptor::model("address", &LEAF).skip_wrapper()];

static SKIPPED_CHOICE: ModelDescriptor = ModelDescriptor {
    schema: B,
    name: "skippedChoiceType",
    element: "skippedChoice",
    base: None,
    fields: &[FieldDescriptor::choice("place", &SKIPPED_ALTERNATIVES)],
    attributes: &[],
};

static DECLARED_TWICE: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "declaredTwiceType",
    element: "declaredTwice",
    base: None,
    fields: &[
        FieldDescriptor::scalar("town", ScalarKind::TEXT),
        FieldDescriptor::scalar("town", ScalarKind::TEXT),
    ],
    attributes: &[],
};

static DUPLICATE_ALTERNATIVES: [FieldDescriptor; 2] = [
    FieldDescriptor::scalar("swissZipCode", ScalarKind::INTEGER),
    FieldDescriptor::scalar("swissZipCode", ScalarKind::TEXT),
];

static BAD_CHOICE: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "badChoiceType",
    element: "badChoice",
    base: None,
    fields: &[FieldDescriptor::choice("zipCode", &DUPLICATE_ALTERNATIVES)],
    attributes: &[],
};

static DUPLICATE_TAGS: [EventVariant; 2] = [
    EventVariant {
        tag: "eventDeath",
        model: &LEAF,
    },
    EventVariant {
        tag: "eventDeath",
        model: &LEAF,
    },
];

static HEADER: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "headerType",
    element: "header",
    base: Some(&LEAF),
    fields: &[],
    attributes: &[],
};

static TOWN_EVENT: [EventVariant; 1] = [EventVariant {
    tag: "town",
    model: &LEAF,
}];

static INHERITED_CLASH: EnvelopeDescriptor = EnvelopeDescriptor {
    name: "delivery",
    model: &HEADER,
    versions: &[EnvelopeVersion {
        schema: A,
        variants: &TOWN_EVENT,
    }],
};

static SKIPPED_HEADER: ModelDescriptor = ModelDescriptor {
    schema: A,
    name: "skippedHeaderType",
    element: "skippedHeader",
    base: None,
    fields: &[FieldDescriptor::model("leaf", &LEAF).skip_wrapper()],
    attributes: &[],
};

static SKIPPED_CLASH: EnvelopeDescriptor = EnvelopeDescriptor {
    name: "delivery",
    model: &SKIPPED_HEADER,
    versions: &[EnvelopeVersion {
        schema: A,
        variants: &TOWN_EVENT,
    }],
};

static BAD_ENVELOPE: EnvelopeDescriptor = EnvelopeDescriptor {
    name: "delivery",
    model: &LEAF,
    versions: &[EnvelopeVersion {
        schema: A,
        variants: &DUPLICATE_TAGS,
    }],
};

#[test]
fn test_extension_cycle() {
    assert!(matches!(
        build(&CYCLE_A),
        Err(SchemaDefinitionError::ExtensionCycle { .. })
    ));
}

#[test]
fn test_field_collision_with_base() {
    let err = build(&SHADOWING).unwrap_err();
    assert_eq!(
        err,
        SchemaDefinitionError::FieldCollision {
            model: "eCH-0010/5:shadowingType".into(),
            field: "town".into(),
            base: "eCH-0010/5:leafType".into(),
        }
    );
}

#[test]
fn test_wrapper_in_content_namespace_is_ambiguous() {
    assert!(matches!(
        build(&SAME_NAMESPACE_WRAPPER),
        Err(SchemaDefinitionError::AmbiguousWrapper { .. })
    ));
}

#[test]
fn test_invalid_wrappers() {
    assert!(matches!(
        build(&SCALAR_WRAPPER),
        Err(SchemaDefinitionError::InvalidWrapper { .. })
    ));
    assert!(matches!(
        build(&OPTIONAL_SKIP),
        Err(SchemaDefinitionError::InvalidWrapper { .. })
    ));
}

#[test]
fn test_unregistered_namespace() {
    assert!(matches!(
        build(&UNREGISTERED),
        Err(SchemaDefinitionError::UnregisteredNamespace { .. })
    ));
}

#[test]
fn test_invalid_pattern() {
    assert!(matches!(
        build(&BAD_PATTERN),
        Err(SchemaDefinitionError::InvalidPattern { .. })
    ));
}

#[test]
fn test_ambiguous_sequence() {
    let err = build(&AMBIGUOUS_SEQUENCE).unwrap_err();
    assert!(matches!(err, SchemaDefinitionError::AmbiguousSequence { .. }));
    assert!(build(&SEPARATED_SEQUENCE).is_ok());
}

#[test]
fn test_single_choice_followed_by_alternative_tag() {
    let err = build(&CHOICE_THEN_ALTERNATIVE).unwrap_err();
    assert_eq!(
        err,
        SchemaDefinitionError::AmbiguousSequence {
            model: "eCH-0010/5:choiceThenAlternativeType".into(),
            field: "addressLine".into(),
            previous: "firstLine".into(),
        }
    );
}

#[test]
fn test_choice_alternative_wrappers() {
    assert!(build(&WRAPPED_CHOICE).is_ok());
    assert!(matches!(
        build(&SKIPPED_CHOICE),
        Err(SchemaDefinitionError::InvalidChoice { .. })
    ));
}

#[test]
fn test_field_declared_twice() {
    assert!(matches!(
        build(&DECLARED_TWICE),
        Err(SchemaDefinitionError::FieldCollision { .. })
    ));
}

#[test]
fn test_duplicate_choice_alternative() {
    assert!(matches!(
        build(&BAD_CHOICE),
        Err(SchemaDefinitionError::InvalidChoice { .. })
    ));
}

#[test]
fn test_duplicate_event_variant() {
    let err = Catalog::builder(registry())
        .envelope(&BAD_ENVELOPE)
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaDefinitionError::DuplicateVariant { .. }));
}

#[test]
fn test_duplicate_namespace() {
    let err = NamespaceRegistry::new(vec![
        NamespaceEntry::ech(A),
        NamespaceEntry::new(B, A.canonical_uri(), "other"),
    ])
    .unwrap_err();
    assert!(matches!(err, SchemaDefinitionError::DuplicateNamespace(_)));
}

#[test]
fn test_unregistered_model_is_rejected_at_codec_time() {
    let catalog = build(&LEAF).unwrap();
    assert!(catalog.contains(&LEAF));
    assert!(!catalog.contains(&SHADOWING));
    assert!(matches!(
        catalog.resolve_fields(&SHADOWING),
        Err(SchemaDefinitionError::UnregisteredModel(_))
    ));
}

#[test]
fn test_variant_clashing_with_inherited_field() {
    for envelope in [&INHERITED_CLASH, &SKIPPED_CLASH] {
        let err = Catalog::builder(registry())
            .envelope(envelope)
            .build()
            .unwrap_err();
        assert!(
            matches!(&err, SchemaDefinitionError::DuplicateVariant { tag, .. } if tag == "town"),
            "{err:?}"
        );
    }
}
