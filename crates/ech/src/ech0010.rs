//! eCH-0010 v5: postal addresses.

use openmun_serde::{
    Alternative, EchChoice, EchModel, FieldDescriptor, ModelDescriptor, RecordReader,
    RecordWriter, ScalarKind, ValidationError,
};

use crate::codes::MrMrs;
use crate::namespaces::ECH0010_V5;

pub static PERSON_MAIL_ADDRESS_INFO: ModelDescriptor = ModelDescriptor {
    schema: ECH0010_V5,
    name: "personMailAddressInfoType",
    element: "person",
    base: None,
    fields: &[
        FieldDescriptor::scalar("mrMrs", ScalarKind::Code(MrMrs::CODES)).optional(),
        FieldDescriptor::scalar("title", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 30)).optional(),
        FieldDescriptor::scalar("lastName", ScalarKind::text(1, 30)),
    ],
    attributes: &[],
};

pub static ORGANISATION_MAIL_ADDRESS_INFO: ModelDescriptor = ModelDescriptor {
    schema: ECH0010_V5,
    name: "organisationMailAddressInfoType",
    element: "organisation",
    base: None,
    fields: &[
        FieldDescriptor::scalar("organisationName", ScalarKind::text(1, 60)),
        FieldDescriptor::scalar("organisationNameAddOn1", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("organisationNameAddOn2", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("mrMrs", ScalarKind::Code(MrMrs::CODES)).optional(),
        FieldDescriptor::scalar("title", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("firstName", ScalarKind::text(1, 30)).optional(),
        FieldDescriptor::scalar("lastName", ScalarKind::text(1, 30)).optional(),
    ],
    attributes: &[],
};

static ZIP_CODE: [FieldDescriptor; 2] = [
    FieldDescriptor::scalar("swissZipCode", ScalarKind::range(1000, 9999)),
    FieldDescriptor::scalar("foreignZipCode", ScalarKind::text(1, 15)),
];

pub static ADDRESS_INFORMATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0010_V5,
    name: "addressInformationType",
    element: "addressInformation",
    base: None,
    fields: &[
        FieldDescriptor::scalar("addressLine1", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("addressLine2", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("street", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("houseNumber", ScalarKind::text(1, 12)).optional(),
        FieldDescriptor::scalar("dwellingNumber", ScalarKind::text(1, 10)).optional(),
        FieldDescriptor::scalar("postOfficeBoxNumber", ScalarKind::range(0, 99_999_999)).optional(),
        FieldDescriptor::scalar("postOfficeBoxText", ScalarKind::text(1, 15)).optional(),
        FieldDescriptor::scalar("locality", ScalarKind::text(1, 40)).optional(),
        FieldDescriptor::scalar("town", ScalarKind::text(1, 40)),
        FieldDescriptor::choice("zipCode", &ZIP_CODE),
        FieldDescriptor::scalar("swissZipCodeAddOn", ScalarKind::text(1, 2)).optional(),
        FieldDescriptor::scalar("swissZipCodeId", ScalarKind::INTEGER).optional(),
        FieldDescriptor::scalar("country", ScalarKind::text(1, 2)),
    ],
    attributes: &[],
};

pub static SWISS_ADDRESS_INFORMATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0010_V5,
    name: "swissAddressInformationType",
    element: "swissAddressInformation",
    base: None,
    fields: &[
        FieldDescriptor::scalar("addressLine1", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("addressLine2", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("street", ScalarKind::text(1, 60)).optional(),
        FieldDescriptor::scalar("houseNumber", ScalarKind::text(1, 12)).optional(),
        FieldDescriptor::scalar("dwellingNumber", ScalarKind::text(1, 10)).optional(),
        FieldDescriptor::scalar("locality", ScalarKind::text(1, 40)).optional(),
        FieldDescriptor::scalar("town", ScalarKind::text(1, 40)),
        FieldDescriptor::scalar("swissZipCode", ScalarKind::range(1000, 9999)),
        FieldDescriptor::scalar("swissZipCodeAddOn", ScalarKind::text(1, 2)).optional(),
        FieldDescriptor::scalar("swissZipCodeId", ScalarKind::INTEGER).optional(),
        FieldDescriptor::scalar("country", ScalarKind::text(1, 2)),
    ],
    attributes: &[],
};

static RECIPIENT: [FieldDescriptor; 2] = [
    FieldDescriptor::model("organisation", &ORGANISATION_MAIL_ADDRESS_INFO),
    FieldDescriptor::model("person", &PERSON_MAIL_ADDRESS_INFO),
];

pub static MAIL_ADDRESS: ModelDescriptor = ModelDescriptor {
    schema: ECH0010_V5,
    name: "mailAddressType",
    element: "mailAddress",
    base: None,
    fields: &[
        FieldDescriptor::choice("recipient", &RECIPIENT),
        FieldDescriptor::model("addressInformation", &ADDRESS_INFORMATION),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonMailAddressInfo {
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: String,
}

impl EchModel for PersonMailAddressInfo {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON_MAIL_ADDRESS_INFO
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            mr_mrs: reader.opt_scalar("mrMrs")?,
            title: reader.opt_scalar("title")?,
            first_name: reader.opt_scalar("firstName")?,
            last_name: reader.scalar("lastName")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("mrMrs", &self.mr_mrs);
        writer.opt_scalar("title", &self.title);
        writer.opt_scalar("firstName", &self.first_name);
        writer.scalar("lastName", &self.last_name);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrganisationMailAddressInfo {
    pub organisation_name: String,
    pub organisation_name_add_on1: Option<String>,
    pub organisation_name_add_on2: Option<String>,
    pub mr_mrs: Option<MrMrs>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl EchModel for OrganisationMailAddressInfo {
    fn descriptor() -> &'static ModelDescriptor {
        &ORGANISATION_MAIL_ADDRESS_INFO
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            organisation_name: reader.scalar("organisationName")?,
            organisation_name_add_on1: reader.opt_scalar("organisationNameAddOn1")?,
            organisation_name_add_on2: reader.opt_scalar("organisationNameAddOn2")?,
            mr_mrs: reader.opt_scalar("mrMrs")?,
            title: reader.opt_scalar("title")?,
            first_name: reader.opt_scalar("firstName")?,
            last_name: reader.opt_scalar("lastName")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("organisationName", &self.organisation_name);
        writer.opt_scalar("organisationNameAddOn1", &self.organisation_name_add_on1);
        writer.opt_scalar("organisationNameAddOn2", &self.organisation_name_add_on2);
        writer.opt_scalar("mrMrs", &self.mr_mrs);
        writer.opt_scalar("title", &self.title);
        writer.opt_scalar("firstName", &self.first_name);
        writer.opt_scalar("lastName", &self.last_name);
    }
}

/// Swiss or foreign postal code of an address.
#[derive(Debug, Clone, PartialEq)]
pub enum ZipCode {
    Swiss(u16),
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
pub struct AddressInformation {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub dwelling_number: Option<String>,
    pub post_office_box_number: Option<u32>,
    pub post_office_box_text: Option<String>,
    pub locality: Option<String>,
    pub town: String,
    pub zip_code: ZipCode,
    pub swiss_zip_code_add_on: Option<String>,
    pub swiss_zip_code_id: Option<i64>,
    pub country: String,
}

impl AddressInformation {
    /// A street address in Switzerland.
    pub fn swiss(
        street: impl Into<String>,
        house_number: impl Into<String>,
        zip_code: u16,
        town: impl Into<String>,
    ) -> Self {
        Self {
            address_line1: None,
            address_line2: None,
            street: Some(street.into()),
            house_number: Some(house_number.into()),
            dwelling_number: None,
            post_office_box_number: None,
            post_office_box_text: None,
            locality: None,
            town: town.into(),
            zip_code: ZipCode::Swiss(zip_code),
            swiss_zip_code_add_on: None,
            swiss_zip_code_id: None,
            country: "CH".into(),
        }
    }
}

impl EchModel for AddressInformation {
    fn descriptor() -> &'static ModelDescriptor {
        &ADDRESS_INFORMATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            address_line1: reader.opt_scalar("addressLine1")?,
            address_line2: reader.opt_scalar("addressLine2")?,
            street: reader.opt_scalar("street")?,
            house_number: reader.opt_scalar("houseNumber")?,
            dwelling_number: reader.opt_scalar("dwellingNumber")?,
            post_office_box_number: reader.opt_scalar("postOfficeBoxNumber")?,
            post_office_box_text: reader.opt_scalar("postOfficeBoxText")?,
            locality: reader.opt_scalar("locality")?,
            town: reader.scalar("town")?,
            zip_code: reader.choice("zipCode")?,
            swiss_zip_code_add_on: reader.opt_scalar("swissZipCodeAddOn")?,
            swiss_zip_code_id: reader.opt_scalar("swissZipCodeId")?,
            country: reader.scalar("country")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("addressLine1", &self.address_line1);
        writer.opt_scalar("addressLine2", &self.address_line2);
        writer.opt_scalar("street", &self.street);
        writer.opt_scalar("houseNumber", &self.house_number);
        writer.opt_scalar("dwellingNumber", &self.dwelling_number);
        writer.opt_scalar("postOfficeBoxNumber", &self.post_office_box_number);
        writer.opt_scalar("postOfficeBoxText", &self.post_office_box_text);
        writer.opt_scalar("locality", &self.locality);
        writer.scalar("town", &self.town);
        writer.choice("zipCode", &self.zip_code);
        writer.opt_scalar("swissZipCodeAddOn", &self.swiss_zip_code_add_on);
        writer.opt_scalar("swissZipCodeId", &self.swiss_zip_code_id);
        writer.scalar("country", &self.country);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwissAddressInformation {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub dwelling_number: Option<String>,
    pub locality: Option<String>,
    pub town: String,
    pub swiss_zip_code: u16,
    pub swiss_zip_code_add_on: Option<String>,
    pub swiss_zip_code_id: Option<i64>,
    pub country: String,
}

impl SwissAddressInformation {
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        swiss_zip_code: u16,
        town: impl Into<String>,
    ) -> Self {
        Self {
            address_line1: None,
            address_line2: None,
            street: Some(street.into()),
            house_number: Some(house_number.into()),
            dwelling_number: None,
            locality: None,
            town: town.into(),
            swiss_zip_code,
            swiss_zip_code_add_on: None,
            swiss_zip_code_id: None,
            country: "CH".into(),
        }
    }
}

impl EchModel for SwissAddressInformation {
    fn descriptor() -> &'static ModelDescriptor {
        &SWISS_ADDRESS_INFORMATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            address_line1: reader.opt_scalar("addressLine1")?,
            address_line2: reader.opt_scalar("addressLine2")?,
            street: reader.opt_scalar("street")?,
            house_number: reader.opt_scalar("houseNumber")?,
            dwelling_number: reader.opt_scalar("dwellingNumber")?,
            locality: reader.opt_scalar("locality")?,
            town: reader.scalar("town")?,
            swiss_zip_code: reader.scalar("swissZipCode")?,
            swiss_zip_code_add_on: reader.opt_scalar("swissZipCodeAddOn")?,
            swiss_zip_code_id: reader.opt_scalar("swissZipCodeId")?,
            country: reader.scalar("country")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("addressLine1", &self.address_line1);
        writer.opt_scalar("addressLine2", &self.address_line2);
        writer.opt_scalar("street", &self.street);
        writer.opt_scalar("houseNumber", &self.house_number);
        writer.opt_scalar("dwellingNumber", &self.dwelling_number);
        writer.opt_scalar("locality", &self.locality);
        writer.scalar("town", &self.town);
        writer.scalar("swissZipCode", &self.swiss_zip_code);
        writer.opt_scalar("swissZipCodeAddOn", &self.swiss_zip_code_add_on);
        writer.opt_scalar("swissZipCodeId", &self.swiss_zip_code_id);
        writer.scalar("country", &self.country);
    }
}

/// Addressee of a mail address.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    Organisation(OrganisationMailAddressInfo),
    Person(PersonMailAddressInfo),
}

impl EchChoice for Recipient {
    fn read(alternative: Alternative) -> Result<Self, ValidationError> {
        match alternative.name() {
            "organisation" => alternative.into_record().map(Recipient::Organisation),
            "person" => alternative.into_record().map(Recipient::Person),
            _ => alternative.unknown(),
        }
    }

    fn write(&self) -> Alternative {
        match self {
            Recipient::Organisation(info) => Alternative::record("organisation", info),
            Recipient::Person(info) => Alternative::record("person", info),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailAddress {
    pub recipient: Recipient,
    pub address_information: AddressInformation,
}

impl EchModel for MailAddress {
    fn descriptor() -> &'static ModelDescriptor {
        &MAIL_ADDRESS
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            recipient: reader.choice("recipient")?,
            address_information: reader.record("addressInformation")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.choice("recipient", &self.recipient);
        writer.record("addressInformation", &self.address_information);
    }
}
