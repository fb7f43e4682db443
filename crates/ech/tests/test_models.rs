use chrono::NaiveDate;
use openmun_ech::codes::{Action, Canton, Sex, TypeOfHousehold};
use openmun_ech::ech0007::SwissMunicipality;
use openmun_ech::ech0010::SwissAddressInformation;
use openmun_ech::ech0011::{Destination, DwellingAddress, Place};
use openmun_ech::ech0020::{Delivery, Event, EventDelivery, EventHeader, EventMoveIn};
use openmun_ech::ech0044::{DatePartiallyKnown, NamedPersonId, PersonIdentification};
use openmun_ech::ech0058::{Header, SendingApplication};
use openmun_ech::ech0099::{self, ErrorInfo, PersonError, Receipt, ValidationReport};
use openmun_ech::namespaces::ECH0020_V3;
use openmun_ech::validation::{Advisor, InMemoryDirectory, MunicipalityAdvisor};
use openmun_ech::{Document, catalog};
use openmun_serde::{Element, XsDateTime};

fn header(message_type: &str) -> Header {
    Header::new(
        "sedex://T1-4001-1",
        "7d3e4f6a-0b1c-4d2e-9f80-112233445566",
        message_type,
        SendingApplication::new("OpenMun", "Registry", "1.4.0"),
        XsDateTime::parse("2024-03-01T09:15:00+01:00").unwrap(),
        Action::Create,
    )
}

fn person() -> PersonIdentification {
    PersonIdentification {
        vn: Some("7561234567897".to_string()),
        local_person_id: NamedPersonId::new("MU.4001", "100234"),
        other_person_id: Vec::new(),
        eu_person_id: Vec::new(),
        official_name: "Muster".to_string(),
        first_name: "Anna".to_string(),
        original_name: None,
        sex: Sex::Female,
        date_of_birth: DatePartiallyKnown::YearMonthDay(NaiveDate::from_ymd_opt(1985, 6, 12).unwrap()),
    }
}

fn move_in(from: SwissMunicipality) -> EventDelivery {
    EventDelivery {
        version: ECH0020_V3,
        envelope: Delivery {
            version: Some("3.0".to_string()),
            delivery_header: EventHeader::from(header("http://www.ech.ch/xmlns/eCH-0020/3")),
        },
        event: Event::MoveIn(EventMoveIn {
            move_in_person: person(),
            arrival_date: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            comes_from: Destination {
                place: Place::SwissTown(from),
                mail_address: None,
            },
            dwelling_address: DwellingAddress::new(
                SwissAddressInformation::new("Marktgasse", "5", 5000, "Aarau"),
                TypeOfHousehold::Private,
            ),
            extension: None,
        }),
    }
}

#[test]
fn test_constructed_delivery_dispatches_back() {
    let catalog = catalog().unwrap();
    let delivery = move_in(SwissMunicipality::new(261, "Zürich", Canton::Zh));

    let xml = catalog.envelope_to_xml_string(&delivery).unwrap();
    let root = Element::parse(&xml).unwrap();
    assert_eq!(root.name.local, "delivery");
    assert_eq!(root.attribute("version"), Some("3.0"));
    assert!(root.child("eventMoveIn").is_some());

    let parsed: EventDelivery = catalog.dispatch_document(&root).unwrap();
    assert_eq!(parsed, delivery);
    assert_eq!(parsed.event.person().official_name, "Muster");
}

#[test]
fn test_inherited_header_fields_keep_their_namespace() {
    let catalog = catalog().unwrap();
    let delivery = move_in(SwissMunicipality::new(261, "Zürich", Canton::Zh));
    let root = catalog.envelope_to_element(&delivery).unwrap();

    let header = root.child("deliveryHeader").unwrap();
    assert_eq!(header.name.namespace, "http://www.ech.ch/xmlns/eCH-0020/3");
    assert_eq!(
        header.child("senderId").unwrap().name.namespace,
        "http://www.ech.ch/xmlns/eCH-0058/5"
    );
}

#[test]
fn test_construction_rejects_invalid_vn() {
    let catalog = catalog().unwrap();
    let mut invalid = person();
    invalid.vn = Some("7561234".to_string());

    let err = catalog.construct(invalid).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.code(), "TypeMismatch");
    assert_eq!(validation.field(), "vn");
}

#[test]
fn test_statistics_delivery_requires_a_person() {
    let catalog = catalog().unwrap();
    let delivery = ech0099::Delivery {
        version: ech0099::SCHEMA_VERSION.to_string(),
        delivery_header: header("http://www.ech.ch/xmlns/eCH-0099/2"),
        reported_person: Vec::new(),
        general_data: vec![ech0099::Data::new("referenceDate", "2023-12-31")],
    };

    let err = catalog.validate(&delivery).unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.code(), "MissingRequiredField");
    assert_eq!(validation.field(), "reportedPerson");
}

#[test]
fn test_validation_report_counts_errors() {
    let catalog = catalog().unwrap();
    let report = ValidationReport {
        version: ech0099::SCHEMA_VERSION.to_string(),
        validation_report_header: header("http://www.ech.ch/xmlns/eCH-0099/2"),
        general_error: vec![ErrorInfo {
            code: "G-017".to_string(),
            text: "Reference date missing".to_string(),
        }],
        person_error: vec![PersonError {
            person_identification: person(),
            error_info: vec![
                ErrorInfo {
                    code: "P-101".to_string(),
                    text: "Religion code not in code list".to_string(),
                },
                ErrorInfo {
                    code: "P-204".to_string(),
                    text: "Arrival date after reference date".to_string(),
                },
            ],
        }],
        general_data: Vec::new(),
    };
    assert_eq!(report.error_count(), 3);

    let document = Document::from(report.clone());
    let xml = document.to_xml_string(catalog).unwrap();
    assert_eq!(Document::from_xml_str(catalog, &xml).unwrap(), document);
}

#[test]
fn test_receipt_requires_version_attribute() {
    let catalog = catalog().unwrap();
    let receipt = Receipt {
        version: ech0099::SCHEMA_VERSION.to_string(),
        receipt_header: header("http://www.ech.ch/xmlns/eCH-0099/2"),
        event_time: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
    };
    let mut root = catalog.to_element(&receipt, &Default::default()).unwrap();
    assert_eq!(root.attribute("version"), Some("2.1"));

    root.attributes.clear();
    let err = catalog.from_xml::<Receipt>(&root).unwrap_err();
    assert_eq!(err.as_validation().unwrap().code(), "MissingRequiredField");
}

#[test]
fn test_advisor_flags_unknown_origin_municipality() {
    let mut directory = InMemoryDirectory::default();
    directory.insert(261, "Zürich", Canton::Zh);
    let advisor = MunicipalityAdvisor::new(directory);

    assert!(advisor.advise(&move_in(SwissMunicipality::new(261, "Zürich", Canton::Zh))).is_empty());

    let warnings = advisor.advise(&move_in(SwissMunicipality::new(262, "Zurich West", Canton::Zh)));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "eventMoveIn/comesFrom/swissTown/municipalityId");
}
