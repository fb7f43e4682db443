//! eCH-0044 v4: person identification.

use chrono::NaiveDate;
use openmun_serde::{
    Alternative, EchChoice, EchModel, FieldDescriptor, GYear, GYearMonth, ModelDescriptor,
    RecordReader, RecordWriter, ScalarKind, ValidationError,
};

use crate::codes::Sex;
use crate::namespaces::ECH0044_V4;

/// AHV-13 social security number.
pub const VN_PATTERN: &str = "756[0-9]{10}";

static DATE_ALTERNATIVES: [FieldDescriptor; 3] = [
    FieldDescriptor::scalar("yearMonthDay", ScalarKind::Date),
    FieldDescriptor::scalar("yearMonth", ScalarKind::GYearMonth),
    FieldDescriptor::scalar("year", ScalarKind::GYear),
];

pub static DATE_PARTIALLY_KNOWN: ModelDescriptor = ModelDescriptor {
    schema: ECH0044_V4,
    name: "datePartiallyKnownType",
    element: "dateOfBirth",
    base: None,
    fields: &[FieldDescriptor::choice("date", &DATE_ALTERNATIVES)],
    attributes: &[],
};

pub static NAMED_PERSON_ID: ModelDescriptor = ModelDescriptor {
    schema: ECH0044_V4,
    name: "namedPersonIdType",
    element: "localPersonId",
    base: None,
    fields: &[
        FieldDescriptor::scalar("personIdCategory", ScalarKind::text(1, 20)),
        FieldDescriptor::scalar("personId", ScalarKind::text(1, 36)),
    ],
    attributes: &[],
};

pub static PERSON_IDENTIFICATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0044_V4,
    name: "personIdentificationType",
    element: "personIdentification",
    base: None,
    fields: &[
        FieldDescriptor::scalar("vn", ScalarKind::pattern(VN_PATTERN)).optional(),
        FieldDescriptor::model("localPersonId", &NAMED_PERSON_ID),
        FieldDescriptor::model("otherPersonId", &NAMED_PERSON_ID).many(),
        FieldDescriptor::model("euPersonId", &NAMED_PERSON_ID).many(),
        FieldDescriptor::scalar("officialName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("originalName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("sex", ScalarKind::Code(Sex::CODES)),
        FieldDescriptor::model("dateOfBirth", &DATE_PARTIALLY_KNOWN),
    ],
    attributes: &[],
};

pub static PERSON_IDENTIFICATION_LIGHT: ModelDescriptor = ModelDescriptor {
    schema: ECH0044_V4,
    name: "personIdentificationLightType",
    element: "personIdentificationLight",
    base: None,
    fields: &[
        FieldDescriptor::scalar("vn", ScalarKind::pattern(VN_PATTERN)).optional(),
        FieldDescriptor::model("localPersonId", &NAMED_PERSON_ID).optional(),
        FieldDescriptor::model("otherPersonId", &NAMED_PERSON_ID).many(),
        FieldDescriptor::scalar("officialName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("originalName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("sex", ScalarKind::Code(Sex::CODES)).optional(),
        FieldDescriptor::model("dateOfBirth", &DATE_PARTIALLY_KNOWN).optional(),
    ],
    attributes: &[],
};

pub static PERSON_IDENTIFICATION_KEY_ONLY: ModelDescriptor = ModelDescriptor {
    schema: ECH0044_V4,
    name: "personIdentificationKeyOnlyType",
    element: "personIdentificationKeyOnly",
    base: None,
    fields: &[
        FieldDescriptor::scalar("vn", ScalarKind::pattern(VN_PATTERN)).optional(),
        FieldDescriptor::model("localPersonId", &NAMED_PERSON_ID),
        FieldDescriptor::model("otherPersonId", &NAMED_PERSON_ID).many(),
        FieldDescriptor::model("euPersonId", &NAMED_PERSON_ID).many(),
    ],
    attributes: &[],
};

/// A date of which only the year, or year and month, may be known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatePartiallyKnown {
    YearMonthDay(NaiveDate),
    YearMonth(GYearMonth),
    Year(GYear),
}

impl EchChoice for DatePartiallyKnown {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "yearMonthDay" => alternative.into_scalar().map(DatePartiallyKnown::YearMonthDay),
            "yearMonth" => alternative.into_scalar().map(DatePartiallyKnown::YearMonth),
            "year" => alternative.into_scalar().map(DatePartiallyKnown::Year),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            DatePartiallyKnown::YearMonthDay(date) => Alternative::scalar("yearMonthDay", date),
            DatePartiallyKnown::YearMonth(month) => Alternative::scalar("yearMonth", month),
            DatePartiallyKnown::Year(year) => Alternative::scalar("year", year),
        }
    }
}

impl EchModel for DatePartiallyKnown {
    fn descriptor() -> &'static ModelDescriptor {
        &DATE_PARTIALLY_KNOWN
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        reader.choice("date")
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.choice("date", self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPersonId {
    pub person_id_category: String,
    pub person_id: String,
}

impl NamedPersonId {
    pub fn new(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            person_id_category: category.into(),
            person_id: id.into(),
        }
    }
}

impl EchModel for NamedPersonId {
    fn descriptor() -> &'static ModelDescriptor {
        &NAMED_PERSON_ID
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            person_id_category: reader.scalar("personIdCategory")?,
            person_id: reader.scalar("personId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("personIdCategory", &self.person_id_category);
        writer.scalar("personId", &self.person_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonIdentification {
    pub vn: Option<String>,
    pub local_person_id: NamedPersonId,
    pub other_person_id: Vec<NamedPersonId>,
    pub eu_person_id: Vec<NamedPersonId>,
    pub official_name: String,
    pub first_name: String,
    pub original_name: Option<String>,
    pub sex: Sex,
    pub date_of_birth: DatePartiallyKnown,
}

impl EchModel for PersonIdentification {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON_IDENTIFICATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            vn: reader.opt_scalar("vn")?,
            local_person_id: reader.record("localPersonId")?,
            other_person_id: reader.records("otherPersonId")?,
            eu_person_id: reader.records("euPersonId")?,
            official_name: reader.scalar("officialName")?,
            first_name: reader.scalar("firstName")?,
            original_name: reader.opt_scalar("originalName")?,
            sex: reader.scalar("sex")?,
            date_of_birth: reader.record("dateOfBirth")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("vn", &self.vn);
        writer.record("localPersonId", &self.local_person_id);
        writer.records("otherPersonId", &self.other_person_id);
        writer.records("euPersonId", &self.eu_person_id);
        writer.scalar("officialName", &self.official_name);
        writer.scalar("firstName", &self.first_name);
        writer.opt_scalar("originalName", &self.original_name);
        writer.scalar("sex", &self.sex);
        writer.record("dateOfBirth", &self.date_of_birth);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonIdentificationLight {
    pub vn: Option<String>,
    pub local_person_id: Option<NamedPersonId>,
    pub other_person_id: Vec<NamedPersonId>,
    pub official_name: String,
    pub first_name: String,
    pub original_name: Option<String>,
    pub sex: Option<Sex>,
    pub date_of_birth: Option<DatePartiallyKnown>,
}

impl EchModel for PersonIdentificationLight {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON_IDENTIFICATION_LIGHT
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            vn: reader.opt_scalar("vn")?,
            local_person_id: reader.opt_record("localPersonId")?,
            other_person_id: reader.records("otherPersonId")?,
            official_name: reader.scalar("officialName")?,
            first_name: reader.scalar("firstName")?,
            original_name: reader.opt_scalar("originalName")?,
            sex: reader.opt_scalar("sex")?,
            date_of_birth: reader.opt_record("dateOfBirth")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("vn", &self.vn);
        writer.opt_record("localPersonId", &self.local_person_id);
        writer.records("otherPersonId", &self.other_person_id);
        writer.scalar("officialName", &self.official_name);
        writer.scalar("firstName", &self.first_name);
        writer.opt_scalar("originalName", &self.original_name);
        writer.opt_scalar("sex", &self.sex);
        writer.opt_record("dateOfBirth", &self.date_of_birth);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonIdentificationKeyOnly {
    pub vn: Option<String>,
    pub local_person_id: NamedPersonId,
    pub other_person_id: Vec<NamedPersonId>,
    pub eu_person_id: Vec<NamedPersonId>,
}

impl EchModel for PersonIdentificationKeyOnly {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON_IDENTIFICATION_KEY_ONLY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            vn: reader.opt_scalar("vn")?,
            local_person_id: reader.record("localPersonId")?,
            other_person_id: reader.records("otherPersonId")?,
            eu_person_id: reader.records("euPersonId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("vn", &self.vn);
        writer.record("localPersonId", &self.local_person_id);
        writer.records("otherPersonId", &self.other_person_id);
        writer.records("euPersonId", &self.eu_person_id);
    }
}
