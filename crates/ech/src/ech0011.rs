//! eCH-0011 v8: person data.
//!
//! A subset of the standard: the blocks the eCH-0020 events and the
//! eCH-0099 statistics delivery carry. Element tags are eCH-0011 even where
//! the content comes from eCH-0007, 0008, 0010 or 0044, so those fields use
//! a namespaced wrapper.

use chrono::NaiveDate;
use openmun_serde::{
    Alternative, EchChoice, EchModel, FieldDescriptor, ModelDescriptor, RecordReader,
    RecordWriter, ScalarKind, ValidationError,
};

use crate::codes::{
    Canton, CancelationReason, Language, MaritalStatus, NationalityStatus, SeparationType, Sex,
    TypeOfHousehold,
};
use crate::ech0007::{SWISS_MUNICIPALITY, SwissMunicipality};
use crate::ech0008::{COUNTRY, Country};
use crate::ech0010::{
    ADDRESS_INFORMATION, AddressInformation, MAIL_ADDRESS, MailAddress,
    SWISS_ADDRESS_INFORMATION, SwissAddressInformation,
};
use crate::ech0044::{
    DATE_PARTIALLY_KNOWN, DatePartiallyKnown, NAMED_PERSON_ID, NamedPersonId,
    PERSON_IDENTIFICATION, PERSON_IDENTIFICATION_LIGHT, PersonIdentification,
    PersonIdentificationLight,
};
use crate::namespaces::ECH0011_V8;

// -- Names ------------------------------------------------------------------

pub static NAME_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "nameDataType",
    element: "nameData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("officialName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("originalName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("allianceName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("aliasName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("otherName", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("callName", ScalarKind::text(1, 100)).optional(),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NameData {
    pub official_name: String,
    pub first_name: String,
    pub original_name: Option<String>,
    pub alliance_name: Option<String>,
    pub alias_name: Option<String>,
    pub other_name: Option<String>,
    pub call_name: Option<String>,
}

impl NameData {
    pub fn new(official_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            official_name: official_name.into(),
            first_name: first_name.into(),
            ..Default::default()
        }
    }
}

impl EchModel for NameData {
    fn descriptor() -> &'static ModelDescriptor {
        &NAME_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            official_name: reader.scalar("officialName")?,
            first_name: reader.scalar("firstName")?,
            original_name: reader.opt_scalar("originalName")?,
            alliance_name: reader.opt_scalar("allianceName")?,
            alias_name: reader.opt_scalar("aliasName")?,
            other_name: reader.opt_scalar("otherName")?,
            call_name: reader.opt_scalar("callName")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("officialName", &self.official_name);
        writer.scalar("firstName", &self.first_name);
        writer.opt_scalar("originalName", &self.original_name);
        writer.opt_scalar("allianceName", &self.alliance_name);
        writer.opt_scalar("aliasName", &self.alias_name);
        writer.opt_scalar("otherName", &self.other_name);
        writer.opt_scalar("callName", &self.call_name);
    }
}

// -- Places -----------------------------------------------------------------

pub static FOREIGN_COUNTRY: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "foreignCountryType",
    element: "foreignCountry",
    base: None,
    fields: &[
        FieldDescriptor::model("country", &COUNTRY).wrapped_in(ECH0011_V8),
        FieldDescriptor::scalar("town", ScalarKind::text(1, 100)).optional(),
    ],
    attributes: &[],
};

/// `unknown` carries the fixed value `0`.
static PLACE: [FieldDescriptor; 3] = [
    FieldDescriptor::scalar("unknown", ScalarKind::Code(&["0"])),
    FieldDescriptor::model("swissTown", &SWISS_MUNICIPALITY).wrapped_in(ECH0011_V8),
    FieldDescriptor::model("foreignCountry", &FOREIGN_COUNTRY),
];

pub static GENERAL_PLACE: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "generalPlaceType",
    element: "placeOfBirth",
    base: None,
    fields: &[FieldDescriptor::choice("place", &PLACE)],
    attributes: &[],
};

pub static DESTINATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "destinationType",
    element: "destination",
    base: None,
    fields: &[
        FieldDescriptor::choice("place", &PLACE),
        FieldDescriptor::model("mailAddress", &ADDRESS_INFORMATION)
            .wrapped_in(ECH0011_V8)
            .optional(),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignCountry {
    pub country: Country,
    pub town: Option<String>,
}

impl EchModel for ForeignCountry {
    fn descriptor() -> &'static ModelDescriptor {
        &FOREIGN_COUNTRY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            country: reader.record("country")?,
            town: reader.opt_scalar("town")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("country", &self.country);
        writer.opt_scalar("town", &self.town);
    }
}

/// Where something happened or someone came from or went to.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    Unknown,
    SwissTown(SwissMunicipality),
    ForeignCountry(ForeignCountry),
}

impl EchChoice for Place {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "unknown" => alternative.into_scalar::<String>().map(|_| Place::Unknown),
            "swissTown" => alternative.into_record().map(Place::SwissTown),
            "foreignCountry" => alternative.into_record().map(Place::ForeignCountry),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            Place::Unknown => Alternative::scalar("unknown", &"0".to_string()),
            Place::SwissTown(municipality) => Alternative::record("swissTown", municipality),
            Place::ForeignCountry(country) => Alternative::record("foreignCountry", country),
        }
    }
}

/// Place of birth or death.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralPlace(pub Place);

impl EchModel for GeneralPlace {
    fn descriptor() -> &'static ModelDescriptor {
        &GENERAL_PLACE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        reader.choice("place").map(GeneralPlace)
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.choice("place", &self.0);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub place: Place,
    pub mail_address: Option<AddressInformation>,
}

impl EchModel for Destination {
    fn descriptor() -> &'static ModelDescriptor {
        &DESTINATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            place: reader.choice("place")?,
            mail_address: reader.opt_record("mailAddress")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.choice("place", &self.place);
        writer.opt_record("mailAddress", &self.mail_address);
    }
}

// -- Birth, religion, marital status, nationality -----------------------------

pub static BIRTH_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "birthDataType",
    element: "birthData",
    base: None,
    fields: &[
        FieldDescriptor::model("dateOfBirth", &DATE_PARTIALLY_KNOWN).wrapped_in(ECH0011_V8),
        FieldDescriptor::model("placeOfBirth", &GENERAL_PLACE),
        FieldDescriptor::scalar("sex", ScalarKind::Code(Sex::CODES)),
    ],
    attributes: &[],
};

pub static RELIGION_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "religionDataType",
    element: "religionData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("religion", ScalarKind::pattern("[0-9]{3,6}")),
        FieldDescriptor::scalar("religionValidFrom", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static SEPARATION_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "separationDataType",
    element: "separationData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("separation", ScalarKind::Code(SeparationType::CODES)).optional(),
        FieldDescriptor::scalar("separationValidFrom", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("separationValidTill", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static MARITAL_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "maritalDataType",
    element: "maritalData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("maritalStatus", ScalarKind::Code(MaritalStatus::CODES)),
        FieldDescriptor::scalar("dateOfMaritalStatus", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("cancelationReason", ScalarKind::Code(CancelationReason::CODES))
            .optional(),
        FieldDescriptor::scalar("officialProofOfMaritalStatusYesNo", ScalarKind::Boolean)
            .optional(),
        FieldDescriptor::model("separationData", &SEPARATION_DATA).optional(),
    ],
    attributes: &[],
};

pub static COUNTRY_INFO: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "countryInfoType",
    element: "countryInfo",
    base: None,
    fields: &[
        FieldDescriptor::model("country", &COUNTRY).wrapped_in(ECH0011_V8),
        FieldDescriptor::scalar("nationalityValidFrom", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static NATIONALITY_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "nationalityDataType",
    element: "nationalityData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("nationalityStatus", ScalarKind::Code(NationalityStatus::CODES)),
        FieldDescriptor::model("countryInfo", &COUNTRY_INFO).many(),
    ],
    attributes: &[],
};

pub static PLACE_OF_ORIGIN: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "placeOfOriginType",
    element: "placeOfOrigin",
    base: None,
    fields: &[
        FieldDescriptor::scalar("originName", ScalarKind::text(1, 50)),
        FieldDescriptor::scalar("canton", ScalarKind::Code(Canton::CODES)),
        FieldDescriptor::scalar("placeOfOriginId", ScalarKind::INTEGER).optional(),
        FieldDescriptor::scalar("historyMunicipalityId", ScalarKind::text(1, 12)).optional(),
    ],
    attributes: &[],
};

pub static RESIDENCE_PERMIT_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "residencePermitDataType",
    element: "residencePermit",
    base: None,
    fields: &[
        FieldDescriptor::scalar("residencePermit", ScalarKind::pattern("[0-9]{2,8}")),
        FieldDescriptor::scalar("residencePermitValidFrom", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("residencePermitValidTill", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("entryDate", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct BirthData {
    pub date_of_birth: DatePartiallyKnown,
    pub place_of_birth: GeneralPlace,
    pub sex: Sex,
}

impl EchModel for BirthData {
    fn descriptor() -> &'static ModelDescriptor {
        &BIRTH_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            date_of_birth: reader.record("dateOfBirth")?,
            place_of_birth: reader.record("placeOfBirth")?,
            sex: reader.scalar("sex")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("dateOfBirth", &self.date_of_birth);
        writer.record("placeOfBirth", &self.place_of_birth);
        writer.scalar("sex", &self.sex);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReligionData {
    /// Religion code, three to six digits.
    pub religion: String,
    pub religion_valid_from: Option<NaiveDate>,
}

impl EchModel for ReligionData {
    fn descriptor() -> &'static ModelDescriptor {
        &RELIGION_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            religion: reader.scalar("religion")?,
            religion_valid_from: reader.opt_scalar("religionValidFrom")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("religion", &self.religion);
        writer.opt_scalar("religionValidFrom", &self.religion_valid_from);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeparationData {
    pub separation: Option<SeparationType>,
    pub separation_valid_from: Option<NaiveDate>,
    pub separation_valid_till: Option<NaiveDate>,
}

impl EchModel for SeparationData {
    fn descriptor() -> &'static ModelDescriptor {
        &SEPARATION_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            separation: reader.opt_scalar("separation")?,
            separation_valid_from: reader.opt_scalar("separationValidFrom")?,
            separation_valid_till: reader.opt_scalar("separationValidTill")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("separation", &self.separation);
        writer.opt_scalar("separationValidFrom", &self.separation_valid_from);
        writer.opt_scalar("separationValidTill", &self.separation_valid_till);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaritalData {
    pub marital_status: MaritalStatus,
    pub date_of_marital_status: Option<NaiveDate>,
    pub cancelation_reason: Option<CancelationReason>,
    pub official_proof_of_marital_status: Option<bool>,
    pub separation_data: Option<SeparationData>,
}

impl MaritalData {
    pub fn new(marital_status: MaritalStatus) -> Self {
        Self {
            marital_status,
            date_of_marital_status: None,
            cancelation_reason: None,
            official_proof_of_marital_status: None,
            separation_data: None,
        }
    }
}

impl EchModel for MaritalData {
    fn descriptor() -> &'static ModelDescriptor {
        &MARITAL_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            marital_status: reader.scalar("maritalStatus")?,
            date_of_marital_status: reader.opt_scalar("dateOfMaritalStatus")?,
            cancelation_reason: reader.opt_scalar("cancelationReason")?,
            official_proof_of_marital_status: reader
                .opt_scalar("officialProofOfMaritalStatusYesNo")?,
            separation_data: reader.opt_record("separationData")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("maritalStatus", &self.marital_status);
        writer.opt_scalar("dateOfMaritalStatus", &self.date_of_marital_status);
        writer.opt_scalar("cancelationReason", &self.cancelation_reason);
        writer.opt_scalar(
            "officialProofOfMaritalStatusYesNo",
            &self.official_proof_of_marital_status,
        );
        writer.opt_record("separationData", &self.separation_data);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfo {
    pub country: Country,
    pub nationality_valid_from: Option<NaiveDate>,
}

impl EchModel for CountryInfo {
    fn descriptor() -> &'static ModelDescriptor {
        &COUNTRY_INFO
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            country: reader.record("country")?,
            nationality_valid_from: reader.opt_scalar("nationalityValidFrom")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("country", &self.country);
        writer.opt_scalar("nationalityValidFrom", &self.nationality_valid_from);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NationalityData {
    pub nationality_status: NationalityStatus,
    pub country_info: Vec<CountryInfo>,
}

impl EchModel for NationalityData {
    fn descriptor() -> &'static ModelDescriptor {
        &NATIONALITY_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            nationality_status: reader.scalar("nationalityStatus")?,
            country_info: reader.records("countryInfo")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("nationalityStatus", &self.nationality_status);
        writer.records("countryInfo", &self.country_info);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOfOrigin {
    pub origin_name: String,
    pub canton: Canton,
    pub place_of_origin_id: Option<i64>,
    pub history_municipality_id: Option<String>,
}

impl EchModel for PlaceOfOrigin {
    fn descriptor() -> &'static ModelDescriptor {
        &PLACE_OF_ORIGIN
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            origin_name: reader.scalar("originName")?,
            canton: reader.scalar("canton")?,
            place_of_origin_id: reader.opt_scalar("placeOfOriginId")?,
            history_municipality_id: reader.opt_scalar("historyMunicipalityId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("originName", &self.origin_name);
        writer.scalar("canton", &self.canton);
        writer.opt_scalar("placeOfOriginId", &self.place_of_origin_id);
        writer.opt_scalar("historyMunicipalityId", &self.history_municipality_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidencePermitData {
    pub residence_permit: String,
    pub residence_permit_valid_from: Option<NaiveDate>,
    pub residence_permit_valid_till: Option<NaiveDate>,
    pub entry_date: Option<NaiveDate>,
}

impl EchModel for ResidencePermitData {
    fn descriptor() -> &'static ModelDescriptor {
        &RESIDENCE_PERMIT_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            residence_permit: reader.scalar("residencePermit")?,
            residence_permit_valid_from: reader.opt_scalar("residencePermitValidFrom")?,
            residence_permit_valid_till: reader.opt_scalar("residencePermitValidTill")?,
            entry_date: reader.opt_scalar("entryDate")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("residencePermit", &self.residence_permit);
        writer.opt_scalar("residencePermitValidFrom", &self.residence_permit_valid_from);
        writer.opt_scalar("residencePermitValidTill", &self.residence_permit_valid_till);
        writer.opt_scalar("entryDate", &self.entry_date);
    }
}

// -- Death and contact ------------------------------------------------------

pub static DEATH_PERIOD: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "deathPeriodType",
    element: "deathPeriod",
    base: None,
    fields: &[
        FieldDescriptor::scalar("dateFrom", ScalarKind::Date),
        FieldDescriptor::scalar("dateTo", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static DEATH_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "deathDataType",
    element: "deathData",
    base: None,
    fields: &[
        FieldDescriptor::model("deathPeriod", &DEATH_PERIOD),
        FieldDescriptor::model("placeOfDeath", &GENERAL_PLACE).optional(),
    ],
    attributes: &[],
};

pub static PARTNER_ID_ORGANISATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "partnerIdOrganisationType",
    element: "partnerIdOrganisation",
    base: None,
    fields: &[
        FieldDescriptor::model("localPersonId", &NAMED_PERSON_ID).wrapped_in(ECH0011_V8),
        FieldDescriptor::model("otherPersonId", &NAMED_PERSON_ID)
            .wrapped_in(ECH0011_V8)
            .many(),
    ],
    attributes: &[],
};

static CONTACT: [FieldDescriptor; 3] = [
    FieldDescriptor::model("personIdentification", &PERSON_IDENTIFICATION).wrapped_in(ECH0011_V8),
    FieldDescriptor::model("personIdentificationPartner", &PERSON_IDENTIFICATION_LIGHT)
        .wrapped_in(ECH0011_V8),
    FieldDescriptor::model("partnerIdOrganisation", &PARTNER_ID_ORGANISATION),
];

pub static CONTACT_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "contactDataType",
    element: "contactData",
    base: None,
    fields: &[
        FieldDescriptor::choice("contact", &CONTACT).optional(),
        FieldDescriptor::model("contactAddress", &MAIL_ADDRESS).wrapped_in(ECH0011_V8),
        FieldDescriptor::scalar("contactValidFrom", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("contactValidTill", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct DeathPeriod {
    pub date_from: NaiveDate,
    pub date_to: Option<NaiveDate>,
}

impl EchModel for DeathPeriod {
    fn descriptor() -> &'static ModelDescriptor {
        &DEATH_PERIOD
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            date_from: reader.scalar("dateFrom")?,
            date_to: reader.opt_scalar("dateTo")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("dateFrom", &self.date_from);
        writer.opt_scalar("dateTo", &self.date_to);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathData {
    pub death_period: DeathPeriod,
    pub place_of_death: Option<GeneralPlace>,
}

impl EchModel for DeathData {
    fn descriptor() -> &'static ModelDescriptor {
        &DEATH_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            death_period: reader.record("deathPeriod")?,
            place_of_death: reader.opt_record("placeOfDeath")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("deathPeriod", &self.death_period);
        writer.opt_record("placeOfDeath", &self.place_of_death);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerIdOrganisation {
    pub local_person_id: NamedPersonId,
    pub other_person_id: Vec<NamedPersonId>,
}

impl EchModel for PartnerIdOrganisation {
    fn descriptor() -> &'static ModelDescriptor {
        &PARTNER_ID_ORGANISATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            local_person_id: reader.record("localPersonId")?,
            other_person_id: reader.records("otherPersonId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("localPersonId", &self.local_person_id);
        writer.records("otherPersonId", &self.other_person_id);
    }
}

/// Who the contact address belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Contact {
    Person(Box<PersonIdentification>),
    Partner(Box<PersonIdentificationLight>),
    Organisation(PartnerIdOrganisation),
}

impl EchChoice for Contact {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "personIdentification" => alternative
                .into_record()
                .map(|person| Contact::Person(Box::new(person))),
            "personIdentificationPartner" => alternative
                .into_record()
                .map(|partner| Contact::Partner(Box::new(partner))),
            "partnerIdOrganisation" => alternative.into_record().map(Contact::Organisation),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            Contact::Person(person) => Alternative::record("personIdentification", person.as_ref()),
            Contact::Partner(partner) => {
                Alternative::record("personIdentificationPartner", partner.as_ref())
            }
            Contact::Organisation(organisation) => {
                Alternative::record("partnerIdOrganisation", organisation)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactData {
    pub contact: Option<Contact>,
    pub contact_address: MailAddress,
    pub contact_valid_from: Option<NaiveDate>,
    pub contact_valid_till: Option<NaiveDate>,
}

impl EchModel for ContactData {
    fn descriptor() -> &'static ModelDescriptor {
        &CONTACT_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            contact: reader.opt_choice("contact")?,
            contact_address: reader.record("contactAddress")?,
            contact_valid_from: reader.opt_scalar("contactValidFrom")?,
            contact_valid_till: reader.opt_scalar("contactValidTill")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_choice("contact", &self.contact);
        writer.record("contactAddress", &self.contact_address);
        writer.opt_scalar("contactValidFrom", &self.contact_valid_from);
        writer.opt_scalar("contactValidTill", &self.contact_valid_till);
    }
}

// -- Dwelling and residence -------------------------------------------------

pub static DWELLING_ADDRESS: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "dwellingAddressType",
    element: "dwellingAddress",
    base: None,
    fields: &[
        FieldDescriptor::scalar("EGID", ScalarKind::range(1, 999_999_999)).optional(),
        FieldDescriptor::scalar("EWID", ScalarKind::range(1, 999)).optional(),
        FieldDescriptor::scalar("householdID", ScalarKind::text(1, 30)).optional(),
        FieldDescriptor::model("address", &SWISS_ADDRESS_INFORMATION).wrapped_in(ECH0011_V8),
        FieldDescriptor::scalar("typeOfHousehold", ScalarKind::Code(TypeOfHousehold::CODES)),
        FieldDescriptor::scalar("movingDate", ScalarKind::Date).optional(),
    ],
    attributes: &[],
};

pub static RESIDENCE_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "residenceDataType",
    element: "mainResidence",
    base: None,
    fields: &[
        FieldDescriptor::model("reportingMunicipality", &SWISS_MUNICIPALITY)
            .wrapped_in(ECH0011_V8),
        FieldDescriptor::scalar("arrivalDate", ScalarKind::Date),
        FieldDescriptor::model("comesFrom", &DESTINATION).optional(),
        FieldDescriptor::model("dwellingAddress", &DWELLING_ADDRESS),
        FieldDescriptor::scalar("departureDate", ScalarKind::Date).optional(),
        FieldDescriptor::model("goesTo", &DESTINATION).optional(),
    ],
    attributes: &[],
};

pub static MAIN_RESIDENCE: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "mainResidenceType",
    element: "hasMainResidence",
    base: None,
    fields: &[
        FieldDescriptor::model("mainResidence", &RESIDENCE_DATA),
        FieldDescriptor::model("secondaryResidence", &SWISS_MUNICIPALITY)
            .wrapped_in(ECH0011_V8)
            .many(),
    ],
    attributes: &[],
};

pub static SECONDARY_RESIDENCE: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "secondaryResidenceType",
    element: "hasSecondaryResidence",
    base: None,
    fields: &[
        FieldDescriptor::model("mainResidence", &SWISS_MUNICIPALITY).wrapped_in(ECH0011_V8),
        FieldDescriptor::model("secondaryResidence", &RESIDENCE_DATA),
    ],
    attributes: &[],
};

pub static OTHER_RESIDENCE: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "otherResidenceType",
    element: "hasOtherResidence",
    base: None,
    fields: &[FieldDescriptor::model("secondaryResidence", &RESIDENCE_DATA)],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct DwellingAddress {
    pub egid: Option<u32>,
    pub ewid: Option<u16>,
    pub household_id: Option<String>,
    pub address: SwissAddressInformation,
    pub type_of_household: TypeOfHousehold,
    pub moving_date: Option<NaiveDate>,
}

impl DwellingAddress {
    pub fn new(address: SwissAddressInformation, type_of_household: TypeOfHousehold) -> Self {
        Self {
            egid: None,
            ewid: None,
            household_id: None,
            address,
            type_of_household,
            moving_date: None,
        }
    }
}

impl EchModel for DwellingAddress {
    fn descriptor() -> &'static ModelDescriptor {
        &DWELLING_ADDRESS
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            egid: reader.opt_scalar("EGID")?,
            ewid: reader.opt_scalar("EWID")?,
            household_id: reader.opt_scalar("householdID")?,
            address: reader.record("address")?,
            type_of_household: reader.scalar("typeOfHousehold")?,
            moving_date: reader.opt_scalar("movingDate")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("EGID", &self.egid);
        writer.opt_scalar("EWID", &self.ewid);
        writer.opt_scalar("householdID", &self.household_id);
        writer.record("address", &self.address);
        writer.scalar("typeOfHousehold", &self.type_of_household);
        writer.opt_scalar("movingDate", &self.moving_date);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidenceData {
    pub reporting_municipality: SwissMunicipality,
    pub arrival_date: NaiveDate,
    pub comes_from: Option<Destination>,
    pub dwelling_address: DwellingAddress,
    pub departure_date: Option<NaiveDate>,
    pub goes_to: Option<Destination>,
}

impl EchModel for ResidenceData {
    fn descriptor() -> &'static ModelDescriptor {
        &RESIDENCE_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            reporting_municipality: reader.record("reportingMunicipality")?,
            arrival_date: reader.scalar("arrivalDate")?,
            comes_from: reader.opt_record("comesFrom")?,
            dwelling_address: reader.record("dwellingAddress")?,
            departure_date: reader.opt_scalar("departureDate")?,
            goes_to: reader.opt_record("goesTo")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("reportingMunicipality", &self.reporting_municipality);
        writer.scalar("arrivalDate", &self.arrival_date);
        writer.opt_record("comesFrom", &self.comes_from);
        writer.record("dwellingAddress", &self.dwelling_address);
        writer.opt_scalar("departureDate", &self.departure_date);
        writer.opt_record("goesTo", &self.goes_to);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainResidence {
    pub main_residence: ResidenceData,
    pub secondary_residence: Vec<SwissMunicipality>,
}

impl EchModel for MainResidence {
    fn descriptor() -> &'static ModelDescriptor {
        &MAIN_RESIDENCE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            main_residence: reader.record("mainResidence")?,
            secondary_residence: reader.records("secondaryResidence")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("mainResidence", &self.main_residence);
        writer.records("secondaryResidence", &self.secondary_residence);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryResidence {
    pub main_residence: SwissMunicipality,
    pub secondary_residence: ResidenceData,
}

impl EchModel for SecondaryResidence {
    fn descriptor() -> &'static ModelDescriptor {
        &SECONDARY_RESIDENCE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            main_residence: reader.record("mainResidence")?,
            secondary_residence: reader.record("secondaryResidence")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("mainResidence", &self.main_residence);
        writer.record("secondaryResidence", &self.secondary_residence);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherResidence {
    pub secondary_residence: ResidenceData,
}

impl EchModel for OtherResidence {
    fn descriptor() -> &'static ModelDescriptor {
        &OTHER_RESIDENCE
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            secondary_residence: reader.record("secondaryResidence")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("secondaryResidence", &self.secondary_residence);
    }
}

// -- Person -----------------------------------------------------------------

pub static PERSON: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "personType",
    element: "person",
    base: None,
    fields: &[
        FieldDescriptor::model("personIdentification", &PERSON_IDENTIFICATION)
            .wrapped_in(ECH0011_V8),
        FieldDescriptor::model("nameData", &NAME_DATA),
        FieldDescriptor::model("birthData", &BIRTH_DATA),
        FieldDescriptor::model("religionData", &RELIGION_DATA),
        FieldDescriptor::model("maritalData", &MARITAL_DATA),
        FieldDescriptor::model("nationalityData", &NATIONALITY_DATA),
        FieldDescriptor::model("deathData", &DEATH_DATA).optional(),
        FieldDescriptor::model("contactData", &CONTACT_DATA).optional(),
        FieldDescriptor::scalar("languageOfCorrespondance", ScalarKind::Code(Language::CODES))
            .optional(),
        FieldDescriptor::scalar("restrictedVotingAndElectionRightFederation", ScalarKind::Boolean)
            .optional(),
        FieldDescriptor::model("placeOfOrigin", &PLACE_OF_ORIGIN).many(),
        FieldDescriptor::model("residencePermit", &RESIDENCE_PERMIT_DATA).optional(),
    ],
    attributes: &[],
};

static RESIDENCE: [FieldDescriptor; 3] = [
    FieldDescriptor::model("hasMainResidence", &MAIN_RESIDENCE),
    FieldDescriptor::model("hasSecondaryResidence", &SECONDARY_RESIDENCE),
    FieldDescriptor::model("hasOtherResidence", &OTHER_RESIDENCE),
];

pub static REPORTED_PERSON: ModelDescriptor = ModelDescriptor {
    schema: ECH0011_V8,
    name: "reportedPersonType",
    element: "reportedPerson",
    base: None,
    fields: &[
        FieldDescriptor::model("person", &PERSON),
        FieldDescriptor::choice("residence", &RESIDENCE),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub person_identification: PersonIdentification,
    pub name_data: NameData,
    pub birth_data: BirthData,
    pub religion_data: ReligionData,
    pub marital_data: MaritalData,
    pub nationality_data: NationalityData,
    pub death_data: Option<DeathData>,
    pub contact_data: Option<ContactData>,
    pub language_of_correspondance: Option<Language>,
    pub restricted_voting_and_election_right_federation: Option<bool>,
    pub place_of_origin: Vec<PlaceOfOrigin>,
    pub residence_permit: Option<ResidencePermitData>,
}

impl EchModel for Person {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            person_identification: reader.record("personIdentification")?,
            name_data: reader.record("nameData")?,
            birth_data: reader.record("birthData")?,
            religion_data: reader.record("religionData")?,
            marital_data: reader.record("maritalData")?,
            nationality_data: reader.record("nationalityData")?,
            death_data: reader.opt_record("deathData")?,
            contact_data: reader.opt_record("contactData")?,
            language_of_correspondance: reader.opt_scalar("languageOfCorrespondance")?,
            restricted_voting_and_election_right_federation: reader
                .opt_scalar("restrictedVotingAndElectionRightFederation")?,
            place_of_origin: reader.records("placeOfOrigin")?,
            residence_permit: reader.opt_record("residencePermit")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("personIdentification", &self.person_identification);
        writer.record("nameData", &self.name_data);
        writer.record("birthData", &self.birth_data);
        writer.record("religionData", &self.religion_data);
        writer.record("maritalData", &self.marital_data);
        writer.record("nationalityData", &self.nationality_data);
        writer.opt_record("deathData", &self.death_data);
        writer.opt_record("contactData", &self.contact_data);
        writer.opt_scalar("languageOfCorrespondance", &self.language_of_correspondance);
        writer.opt_scalar(
            "restrictedVotingAndElectionRightFederation",
            &self.restricted_voting_and_election_right_federation,
        );
        writer.records("placeOfOrigin", &self.place_of_origin);
        writer.opt_record("residencePermit", &self.residence_permit);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Residence {
    Main(MainResidence),
    Secondary(SecondaryResidence),
    Other(OtherResidence),
}

impl Residence {
    pub fn data(&self) -> &ResidenceData {
        match self {
            Residence::Main(main) => &main.main_residence,
            Residence::Secondary(secondary) => &secondary.secondary_residence,
            Residence::Other(other) => &other.secondary_residence,
        }
    }
}

impl EchChoice for Residence {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "hasMainResidence" => alternative.into_record().map(Residence::Main),
            "hasSecondaryResidence" => alternative.into_record().map(Residence::Secondary),
            "hasOtherResidence" => alternative.into_record().map(Residence::Other),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            Residence::Main(main) => Alternative::record("hasMainResidence", main),
            Residence::Secondary(secondary) => {
                Alternative::record("hasSecondaryResidence", secondary)
            }
            Residence::Other(other) => Alternative::record("hasOtherResidence", other),
        }
    }
}

/// A person together with the residence the report is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPerson {
    pub person: Box<Person>,
    pub residence: Residence,
}

impl EchModel for ReportedPerson {
    fn descriptor() -> &'static ModelDescriptor {
        &REPORTED_PERSON
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            person: Box::new(reader.record("person")?),
            residence: reader.choice("residence")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("person", self.person.as_ref());
        writer.choice("residence", &self.residence);
    }
}
