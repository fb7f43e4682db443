#![allow(dead_code)]

use openmun_serde::{
    Alternative, Catalog, EchChoice, EchModel, FieldDescriptor, ModelDescriptor, NamespaceEntry,
    NamespaceRegistry, RecordReader, RecordWriter, ScalarKind, SchemaId, ValidationError,
};

pub const ADDRESS_NS: SchemaId = SchemaId::new("eCH-0010", 5);
pub const PERSON_NS: SchemaId = SchemaId::new("eCH-0044", 4);
pub const EVENT_NS: SchemaId = SchemaId::new("eCH-0020", 3);

pub fn uri(schema: SchemaId) -> String {
    schema.canonical_uri()
}

pub fn registry() -> NamespaceRegistry {
    NamespaceRegistry::new(vec![
        NamespaceEntry::ech(ADDRESS_NS),
        NamespaceEntry::ech(PERSON_NS),
        NamespaceEntry::ech(EVENT_NS).with_alias("http://www.ech.ch/xmlns/eCH-0020-3/3"),
    ])
    .unwrap()
}

pub fn catalog() -> Catalog {
    Catalog::builder(registry())
        .models([
            &ADDRESS,
            &ZIP_ADDRESS,
            &PERSON_IDENTIFICATION,
            &EXTENDED_PERSON,
            &MOVE_IN,
            &DESTINATION,
            &IDENTIFICATION,
        ])
        .build()
        .unwrap()
}

// -- Address --------------------------------------------------------------

pub static ADDRESS: ModelDescriptor = ModelDescriptor {
    schema: ADDRESS_NS,
    name: "addressInformationType",
    element: "addressInformation",
    base: None,
    fields: &[
        FieldDescriptor::scalar("street", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("houseNumber", ScalarKind::text(1, 12)).optional(),
        FieldDescriptor::scalar("postOfficeBoxNumber", ScalarKind::range(0, 99_999_999)).optional(),
        FieldDescriptor::scalar("town", ScalarKind::text(1, 40)),
        FieldDescriptor::scalar("swissZipCode", ScalarKind::range(1000, 9999)),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub post_office_box_number: Option<u32>,
    pub town: String,
    pub swiss_zip_code: u32,
}

impl EchModel for Address {
    fn descriptor() -> &'static ModelDescriptor {
        &ADDRESS
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            street: reader.opt_scalar("street")?,
            house_number: reader.opt_scalar("houseNumber")?,
            post_office_box_number: reader.opt_scalar("postOfficeBoxNumber")?,
            town: reader.scalar("town")?,
            swiss_zip_code: reader.scalar("swissZipCode")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("street", &self.street);
        writer.opt_scalar("houseNumber", &self.house_number);
        writer.opt_scalar("postOfficeBoxNumber", &self.post_office_box_number);
        writer.scalar("town", &self.town);
        writer.scalar("swissZipCode", &self.swiss_zip_code);
    }
}

// -- Choice ---------------------------------------------------------------

static ZIP_ALTERNATIVES: [FieldDescriptor; 2] = [
    FieldDescriptor::scalar("swissZipCode", ScalarKind::range(1000, 9999)),
    FieldDescriptor::scalar("foreignZipCode", ScalarKind::text(1, 15)),
];

pub static ZIP_ADDRESS: ModelDescriptor = ModelDescriptor {
    schema: ADDRESS_NS,
    name: "zipAddressType",
    element: "zipAddress",
    base: None,
    fields: &[
        FieldDescriptor::scalar("town", ScalarKind::text(1, 40)),
        FieldDescriptor::choice("zipCode", &ZIP_ALTERNATIVES),
        FieldDescriptor::scalar("country", ScalarKind::pattern("[A-Z]{2}")),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub enum ZipCode {
    Swiss(u32),
    Foreign(String),
}

impl EchChoice for ZipCode {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "swissZipCode" => alternative.into_scalar().map(ZipCode::Swiss),
            "foreignZipCode" => alternative.into_scalar().map(ZipCode::Foreign),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            ZipCode::Swiss(code) => Alternative::scalar("swissZipCode", code),
            ZipCode::Foreign(code) => Alternative::scalar("foreignZipCode", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZipAddress {
    pub town: String,
    pub zip_code: ZipCode,
    pub country: String,
}

impl EchModel for ZipAddress {
    fn descriptor() -> &'static ModelDescriptor {
        &ZIP_ADDRESS
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            town: reader.scalar("town")?,
            zip_code: reader.choice("zipCode")?,
            country: reader.scalar("country")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("town", &self.town);
        writer.choice("zipCode", &self.zip_code);
        writer.scalar("country", &self.country);
    }
}

// -- Extension ------------------------------------------------------------

pub static PERSON_IDENTIFICATION: ModelDescriptor = ModelDescriptor {
    schema: PERSON_NS,
    name: "personIdentificationType",
    element: "personIdentification",
    base: None,
    fields: &[
        FieldDescriptor::scalar("vn", ScalarKind::pattern("756[0-9]{10}")).optional(),
        FieldDescriptor::scalar("officialName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 100)),
    ],
    attributes: &[],
};

/// Derived in another schema: base fields stay in the base namespace.
pub static EXTENDED_PERSON: ModelDescriptor = ModelDescriptor {
    schema: EVENT_NS,
    name: "extendedPersonType",
    element: "extendedPerson",
    base: Some(&PERSON_IDENTIFICATION),
    fields: &[
        FieldDescriptor::scalar("dateOfBirth", ScalarKind::Date),
        FieldDescriptor::scalar("remark", ScalarKind::TEXT).many(),
    ],
    attributes: &[],
};

// -- Wrapper with namespace -------------------------------------------------

/// `movingAddress` is an eCH-0020 element holding eCH-0010 content.
pub static MOVE_IN: ModelDescriptor = ModelDescriptor {
    schema: EVENT_NS,
    name: "moveInType",
    element: "moveIn",
    base: None,
    fields: &[
        FieldDescriptor::scalar("arrivalDate", ScalarKind::Date),
        FieldDescriptor::model("movingAddress", &ADDRESS).wrapped_in(EVENT_NS),
    ],
    attributes: &[],
};

/// `swissAddress` is a choice alternative with its own wrapper namespace.
static DESTINATION_PLACE: [FieldDescriptor; 2] = [
    FieldDescriptor::scalar("unknown", ScalarKind::Code(&["0"])),
    FieldDescriptor::model("swissAddress", &ADDRESS).wrapped_in(EVENT_NS),
];

pub static DESTINATION: ModelDescriptor = ModelDescriptor {
    schema: EVENT_NS,
    name: "destinationType",
    element: "destination",
    base: None,
    fields: &[
        FieldDescriptor::choice("place", &DESTINATION_PLACE),
        FieldDescriptor::scalar("arrivalDate", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

// -- Skip wrapper ---------------------------------------------------------

pub static NAME_DATA: ModelDescriptor = ModelDescriptor {
    schema: PERSON_NS,
    name: "nameDataType",
    element: "nameData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("officialName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("callName", ScalarKind::text(1, 100)).optional(),
    ],
    attributes: &[],
};

pub static IDENTIFICATION: ModelDescriptor = ModelDescriptor {
    schema: PERSON_NS,
    name: "identificationType",
    element: "identification",
    base: None,
    fields: &[
        FieldDescriptor::scalar("localPersonId", ScalarKind::INTEGER),
        FieldDescriptor::model("name", &NAME_DATA).skip_wrapper(),
        FieldDescriptor::scalar("sex", ScalarKind::Code(&["1", "2", "3"])),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct NameData {
    pub official_name: String,
    pub first_name: String,
    pub call_name: Option<String>,
}

impl EchModel for NameData {
    fn descriptor() -> &'static ModelDescriptor {
        &NAME_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            official_name: reader.scalar("officialName")?,
            first_name: reader.scalar("firstName")?,
            call_name: reader.opt_scalar("callName")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("officialName", &self.official_name);
        writer.scalar("firstName", &self.first_name);
        writer.opt_scalar("callName", &self.call_name);
    }
}
