//! eCH-0020 v3: registry event deliveries.
//!
//! A delivery is a `deliveryHeader` followed by exactly one event element.
//! The header type extends the eCH-0058 header, so its inherited fields
//! stay in the eCH-0058 namespace while the extension fields are eCH-0020.

use chrono::NaiveDate;
use openmun_serde::{
    AttributeDescriptor, EchModel, Element, EnvelopeDescriptor, EnvelopeVersion, EventFamily,
    EventVariant, FieldDescriptor, ModelDescriptor, Record, RecordReader, RecordWriter,
    ScalarKind, ValidationError, unknown_event,
};

use crate::codes::DataLock;
use crate::ech0011::{
    CONTACT_DATA, ContactData, DEATH_DATA, DESTINATION, DWELLING_ADDRESS, DeathData, Destination,
    DwellingAddress, MARITAL_DATA, MaritalData, NAME_DATA, NameData,
};
use crate::ech0044::{PERSON_IDENTIFICATION, PersonIdentification};
use crate::ech0058::{self, Header};
use crate::namespaces::ECH0020_V3;

pub static HEADER: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "headerType",
    element: "deliveryHeader",
    base: Some(&ech0058::HEADER),
    fields: &[
        FieldDescriptor::scalar("dataLock", ScalarKind::Code(DataLock::CODES)).optional(),
        FieldDescriptor::scalar("dataLockValidFrom", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("dataLockValidTill", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static DELIVERY: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "deliveryType",
    element: "delivery",
    base: None,
    fields: &[FieldDescriptor::model("deliveryHeader", &HEADER)],
    attributes: &[AttributeDescriptor::optional("version", ScalarKind::text(1, 10))],
};

/// Person identification under an eCH-0020 tag.
const fn person(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::model(name, &PERSON_IDENTIFICATION).wrapped_in(ECH0020_V3)
}

const EXTENSION: FieldDescriptor = FieldDescriptor::any("extension").optional();

pub static EVENT_DEATH: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventDeathType",
    element: "eventDeath",
    base: None,
    fields: &[
        person("deathPerson"),
        FieldDescriptor::model("deathData", &DEATH_DATA).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_MARRIAGE: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventMarriageType",
    element: "eventMarriage",
    base: None,
    fields: &[
        person("marriagePerson"),
        FieldDescriptor::model("maritalData", &MARITAL_DATA).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_CHANGE_NAME: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventChangeNameType",
    element: "eventChangeName",
    base: None,
    fields: &[
        person("changeNamePerson"),
        FieldDescriptor::model("nameData", &NAME_DATA).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_MOVE_IN: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventMoveInType",
    element: "eventMoveIn",
    base: None,
    fields: &[
        person("moveInPerson"),
        FieldDescriptor::scalar("arrivalDate", ScalarKind::Date),
        FieldDescriptor::model("comesFrom", &DESTINATION).wrapped_in(ECH0020_V3),
        FieldDescriptor::model("dwellingAddress", &DWELLING_ADDRESS).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_MOVE: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventMoveType",
    element: "eventMove",
    base: None,
    fields: &[
        person("movePerson"),
        FieldDescriptor::model("dwellingAddress", &DWELLING_ADDRESS).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_MOVE_OUT: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventMoveOutType",
    element: "eventMoveOut",
    base: None,
    fields: &[
        person("moveOutPerson"),
        FieldDescriptor::scalar("departureDate", ScalarKind::Date),
        FieldDescriptor::model("goesTo", &DESTINATION).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_CONTACT: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventContactType",
    element: "eventContact",
    base: None,
    fields: &[
        person("contactPerson"),
        FieldDescriptor::model("contactData", &CONTACT_DATA)
            .wrapped_in(ECH0020_V3)
            .optional(),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_CORRECT_CONTACT: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventCorrectContactType",
    element: "eventCorrectContact",
    base: None,
    fields: &[
        person("correctContactPerson"),
        FieldDescriptor::model("contactData", &CONTACT_DATA)
            .wrapped_in(ECH0020_V3)
            .optional(),
        EXTENSION,
    ],
    attributes: &[],
};

pub static EVENT_CORRECT_NAME: ModelDescriptor = ModelDescriptor {
    schema: ECH0020_V3,
    name: "eventCorrectNameType",
    element: "eventCorrectName",
    base: None,
    fields: &[
        person("correctNamePerson"),
        FieldDescriptor::model("nameData", &NAME_DATA).wrapped_in(ECH0020_V3),
        EXTENSION,
    ],
    attributes: &[],
};

static V3_VARIANTS: [EventVariant; 9] = [
    EventVariant {
        tag: "eventDeath",
        model: &EVENT_DEATH,
    },
    EventVariant {
        tag: "eventMarriage",
        model: &EVENT_MARRIAGE,
    },
    EventVariant {
        tag: "eventChangeName",
        model: &EVENT_CHANGE_NAME,
    },
    EventVariant {
        tag: "eventMoveIn",
        model: &EVENT_MOVE_IN,
    },
    EventVariant {
        tag: "eventMove",
        model: &EVENT_MOVE,
    },
    EventVariant {
        tag: "eventMoveOut",
        model: &EVENT_MOVE_OUT,
    },
    EventVariant {
        tag: "eventContact",
        model: &EVENT_CONTACT,
    },
    EventVariant {
        tag: "eventCorrectContact",
        model: &EVENT_CORRECT_CONTACT,
    },
    EventVariant {
        tag: "eventCorrectName",
        model: &EVENT_CORRECT_NAME,
    },
];

pub static DELIVERY_ENVELOPE: EnvelopeDescriptor = EnvelopeDescriptor {
    name: "eCH-0020 delivery",
    model: &DELIVERY,
    versions: &[EnvelopeVersion {
        schema: ECH0020_V3,
        variants: &V3_VARIANTS,
    }],
};

// -- Header and envelope ------------------------------------------------------

/// eCH-0058 header plus the eCH-0020 data lock.
#[derive(Debug, Clone, PartialEq)]
pub struct EventHeader {
    pub header: Header,
    pub data_lock: Option<DataLock>,
    pub data_lock_valid_from: Option<NaiveDate>,
    pub data_lock_valid_till: Option<NaiveDate>,
}

impl From<Header> for EventHeader {
    fn from(header: Header) -> Self {
        Self {
            header,
            data_lock: None,
            data_lock_valid_from: None,
            data_lock_valid_till: None,
        }
    }
}

impl EchModel for EventHeader {
    fn descriptor() -> &'static ModelDescriptor {
        &HEADER
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            header: Header::read_fields(reader)?,
            data_lock: reader.opt_scalar("dataLock")?,
            data_lock_valid_from: reader.opt_scalar("dataLockValidFrom")?,
            data_lock_valid_till: reader.opt_scalar("dataLockValidTill")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        self.header.write_fields(writer);
        writer.opt_scalar("dataLock", &self.data_lock);
        writer.opt_scalar("dataLockValidFrom", &self.data_lock_valid_from);
        writer.opt_scalar("dataLockValidTill", &self.data_lock_valid_till);
    }
}

/// The fixed part of a delivery: its header and version attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub version: Option<String>,
    pub delivery_header: EventHeader,
}

impl EchModel for Delivery {
    fn descriptor() -> &'static ModelDescriptor {
        &DELIVERY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            version: reader.opt_attribute("version")?,
            delivery_header: reader.record("deliveryHeader")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_attribute("version", &self.version);
        writer.record("deliveryHeader", &self.delivery_header);
    }
}

// -- Events -------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct EventDeath {
    pub death_person: PersonIdentification,
    pub death_data: DeathData,
    pub extension: Option<Element>,
}

impl EchModel for EventDeath {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_DEATH
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            death_person: reader.record("deathPerson")?,
            death_data: reader.record("deathData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("deathPerson", &self.death_person);
        writer.record("deathData", &self.death_data);
        writer.opt_any("extension", &self.extension);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMarriage {
    pub marriage_person: PersonIdentification,
    pub marital_data: MaritalData,
    pub extension: Option<Element>,
}

impl EchModel for EventMarriage {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_MARRIAGE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            marriage_person: reader.record("marriagePerson")?,
            marital_data: reader.record("maritalData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("marriagePerson", &self.marriage_person);
        writer.record("maritalData", &self.marital_data);
        writer.opt_any("extension", &self.extension);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventChangeName {
    pub change_name_person: PersonIdentification,
    pub name_data: NameData,
    pub extension: Option<Element>,
}

impl EchModel for EventChangeName {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_CHANGE_NAME
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            change_name_person: reader.record("changeNamePerson")?,
            name_data: reader.record("nameData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("changeNamePerson", &self.change_name_person);
        writer.record("nameData", &self.name_data);
        writer.opt_any("extension", &self.extension);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMoveIn {
    pub move_in_person: PersonIdentification,
    pub arrival_date: NaiveDate,
    pub comes_from: Destination,
    pub dwelling_address: DwellingAddress,
    pub extension: Option<Element>,
}

impl EchModel for EventMoveIn {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_MOVE_IN
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            move_in_person: reader.record("moveInPerson")?,
            arrival_date: reader.scalar("arrivalDate")?,
            comes_from: reader.record("comesFrom")?,
            dwelling_address: reader.record("dwellingAddress")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("moveInPerson", &self.move_in_person);
        writer.scalar("arrivalDate", &self.arrival_date);
        writer.record("comesFrom", &self.comes_from);
        writer.record("dwellingAddress", &self.dwelling_address);
        writer.opt_any("extension", &self.extension);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMove {
    pub move_person: PersonIdentification,
    pub dwelling_address: DwellingAddress,
    pub extension: Option<Element>,
}

impl EchModel for EventMove {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_MOVE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            move_person: reader.record("movePerson")?,
            dwelling_address: reader.record("dwellingAddress")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("movePerson", &self.move_person);
        writer.record("dwellingAddress", &self.dwelling_address);
        writer.opt_any("extension", &self.extension);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMoveOut {
    pub move_out_person: PersonIdentification,
    pub departure_date: NaiveDate,
    pub goes_to: Destination,
    pub extension: Option<Element>,
}

impl EchModel for EventMoveOut {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_MOVE_OUT
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            move_out_person: reader.record("moveOutPerson")?,
            departure_date: reader.scalar("departureDate")?,
            goes_to: reader.record("goesTo")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("moveOutPerson", &self.move_out_person);
        writer.scalar("departureDate", &self.departure_date);
        writer.record("goesTo", &self.goes_to);
        writer.opt_any("extension", &self.extension);
    }
}

/// Contact data of a person, new or corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContact {
    pub person: PersonIdentification,
    pub contact_data: Option<ContactData>,
    pub extension: Option<Element>,
}

impl EventContact {
    fn read_as(reader: &mut RecordReader, person: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            person: reader.record(person)?,
            contact_data: reader.opt_record("contactData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write_as(&self, model: &'static ModelDescriptor, person: &'static str) -> Record {
        let mut writer = RecordWriter::new(model);
        writer.record(person, &self.person);
        writer.opt_record("contactData", &self.contact_data);
        writer.opt_any("extension", &self.extension);
        writer.finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventCorrectName {
    pub correct_name_person: PersonIdentification,
    pub name_data: NameData,
    pub extension: Option<Element>,
}

impl EchModel for EventCorrectName {
    fn descriptor() -> &'static ModelDescriptor {
        &EVENT_CORRECT_NAME
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            correct_name_person: reader.record("correctNamePerson")?,
            name_data: reader.record("nameData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("correctNamePerson", &self.correct_name_person);
        writer.record("nameData", &self.name_data);
        writer.opt_any("extension", &self.extension);
    }
}

/// The event carried by an eCH-0020 delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Death(EventDeath),
    Marriage(EventMarriage),
    ChangeName(EventChangeName),
    MoveIn(EventMoveIn),
    Move(EventMove),
    MoveOut(EventMoveOut),
    Contact(EventContact),
    CorrectContact(EventContact),
    CorrectName(EventCorrectName),
}

impl Event {
    /// The person the event is about.
    pub fn person(&self) -> &PersonIdentification {
        match self {
            Event::Death(e) => &e.death_person,
            Event::Marriage(e) => &e.marriage_person,
            Event::ChangeName(e) => &e.change_name_person,
            Event::MoveIn(e) => &e.move_in_person,
            Event::Move(e) => &e.move_person,
            Event::MoveOut(e) => &e.move_out_person,
            Event::Contact(e) | Event::CorrectContact(e) => &e.person,
            Event::CorrectName(e) => &e.correct_name_person,
        }
    }
}

impl EventFamily for Event {
    type Envelope = Delivery;

    fn descriptor() -> &'static EnvelopeDescriptor {
        &DELIVERY_ENVELOPE
    }

    fn read_event(tag: &str, reader: &mut RecordReader) -> Result<Self, ValidationError> {
        match tag {
            "eventDeath" => EventDeath::read(reader).map(Event::Death),
            "eventMarriage" => EventMarriage::read(reader).map(Event::Marriage),
            "eventChangeName" => EventChangeName::read(reader).map(Event::ChangeName),
            "eventMoveIn" => EventMoveIn::read(reader).map(Event::MoveIn),
            "eventMove" => EventMove::read(reader).map(Event::Move),
            "eventMoveOut" => EventMoveOut::read(reader).map(Event::MoveOut),
            "eventContact" => EventContact::read_as(reader, "contactPerson").map(Event::Contact),
            "eventCorrectContact" => {
                EventContact::read_as(reader, "correctContactPerson").map(Event::CorrectContact)
            }
            "eventCorrectName" => EventCorrectName::read(reader).map(Event::CorrectName),
            other => unknown_event(&DELIVERY_ENVELOPE, other),
        }
    }

    fn event_tag(&self) -> &'static str {
        match self {
            Event::Death(_) => "eventDeath",
            Event::Marriage(_) => "eventMarriage",
            Event::ChangeName(_) => "eventChangeName",
            Event::MoveIn(_) => "eventMoveIn",
            Event::Move(_) => "eventMove",
            Event::MoveOut(_) => "eventMoveOut",
            Event::Contact(_) => "eventContact",
            Event::CorrectContact(_) => "eventCorrectContact",
            Event::CorrectName(_) => "eventCorrectName",
        }
    }

    fn write_event(&self) -> Record {
        match self {
            Event::Death(e) => e.to_record(),
            Event::Marriage(e) => e.to_record(),
            Event::ChangeName(e) => e.to_record(),
            Event::MoveIn(e) => e.to_record(),
            Event::Move(e) => e.to_record(),
            Event::MoveOut(e) => e.to_record(),
            Event::Contact(e) => e.write_as(&EVENT_CONTACT, "contactPerson"),
            Event::CorrectContact(e) => e.write_as(&EVENT_CORRECT_CONTACT, "correctContactPerson"),
            Event::CorrectName(e) => e.to_record(),
        }
    }
}

/// A parsed eCH-0020 delivery.
pub type EventDelivery = openmun_serde::EventEnvelope<Event>;
