//! eCH-0099 v2: population statistics deliveries to the federal office.
//!
//! eCH-0099 still carries eCH-0058 v4 headers. The header fields are the
//! shared eCH-0058 descriptor placed in the v4 namespace, inside an
//! eCH-0099 wrapper element.

use chrono::NaiveDate;
use openmun_serde::{
    AttributeDescriptor, EchModel, FieldDescriptor, ModelDescriptor, RecordReader, RecordWriter,
    ScalarKind, ValidationError,
};

use crate::ech0011::{REPORTED_PERSON, ReportedPerson};
use crate::ech0044::{PERSON_IDENTIFICATION, PersonIdentification};
use crate::ech0058::{self, Header};
use crate::namespaces::{ECH0058_V4, ECH0099_V2};

/// Value of the `version` attribute on every eCH-0099 root element.
pub const SCHEMA_VERSION: &str = "2.1";

const VERSION: AttributeDescriptor = AttributeDescriptor::required("version", ScalarKind::text(1, 10));

/// An eCH-0058 v4 header under an eCH-0099 tag.
const fn header(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::model(name, &ech0058::HEADER)
        .in_namespace(ECH0058_V4)
        .wrapped_in(ECH0099_V2)
}

pub static DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "dataType",
    element: "generalData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("field", ScalarKind::text(1, 100)),
        FieldDescriptor::scalar("value", ScalarKind::text(1, 1000)),
    ],
    attributes: &[],
};

pub static REPORTED_PERSON_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "reportedPersonType",
    element: "reportedPerson",
    base: None,
    fields: &[
        FieldDescriptor::model("baseData", &REPORTED_PERSON).wrapped_in(ECH0099_V2),
        FieldDescriptor::model("personExtendedData", &DATA).many(),
    ],
    attributes: &[],
};

pub static DELIVERY: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "deliveryType",
    element: "delivery",
    base: None,
    fields: &[
        header("deliveryHeader"),
        FieldDescriptor::model("reportedPerson", &REPORTED_PERSON_DATA).at_least(1),
        FieldDescriptor::model("generalData", &DATA).many(),
    ],
    attributes: &[VERSION],
};

pub static ERROR_INFO: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "errorInfoType",
    element: "errorInfo",
    base: None,
    fields: &[
        FieldDescriptor::scalar("code", ScalarKind::text(1, 20)),
        FieldDescriptor::scalar("text", ScalarKind::text(1, 1000)),
    ],
    attributes: &[],
};

pub static PERSON_ERROR: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "personErrorType",
    element: "personError",
    base: None,
    fields: &[
        FieldDescriptor::model("personIdentification", &PERSON_IDENTIFICATION)
            .wrapped_in(ECH0099_V2),
        FieldDescriptor::model("errorInfo", &ERROR_INFO).at_least(1),
    ],
    attributes: &[],
};

pub static VALIDATION_REPORT: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "validationReportType",
    element: "validationReport",
    base: None,
    fields: &[
        header("validationReportHeader"),
        FieldDescriptor::model("generalError", &ERROR_INFO).many(),
        FieldDescriptor::model("personError", &PERSON_ERROR).many(),
        FieldDescriptor::model("generalData", &DATA).many(),
    ],
    attributes: &[VERSION],
};

pub static RECEIPT: ModelDescriptor = ModelDescriptor {
    schema: ECH0099_V2,
    name: "receiptType",
    element: "receipt",
    base: None,
    fields: &[
        header("receiptHeader"),
        FieldDescriptor::scalar("eventTime", ScalarKind::Date),
    ],
    attributes: &[VERSION],
};

/// A free-form field/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub field: String,
    pub value: String,
}

impl Data {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl EchModel for Data {
    fn descriptor() -> &'static ModelDescriptor {
        &DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            field: reader.scalar("field")?,
            value: reader.scalar("value")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("field", &self.field);
        writer.scalar("value", &self.value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPersonData {
    pub base_data: ReportedPerson,
    pub person_extended_data: Vec<Data>,
}

impl EchModel for ReportedPersonData {
    fn descriptor() -> &'static ModelDescriptor {
        &REPORTED_PERSON_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            base_data: reader.record("baseData")?,
            person_extended_data: reader.records("personExtendedData")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("baseData", &self.base_data);
        writer.records("personExtendedData", &self.person_extended_data);
    }
}

/// A statistics delivery: at least one reported person.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub version: String,
    pub delivery_header: Header,
    pub reported_person: Vec<ReportedPersonData>,
    pub general_data: Vec<Data>,
}

impl EchModel for Delivery {
    fn descriptor() -> &'static ModelDescriptor {
        &DELIVERY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            version: reader.attribute("version")?,
            delivery_header: reader.record("deliveryHeader")?,
            reported_person: reader.records("reportedPerson")?,
            general_data: reader.records("generalData")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.attribute("version", &self.version);
        writer.record("deliveryHeader", &self.delivery_header);
        writer.records("reportedPerson", &self.reported_person);
        writer.records("generalData", &self.general_data);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub text: String,
}

impl EchModel for ErrorInfo {
    fn descriptor() -> &'static ModelDescriptor {
        &ERROR_INFO
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            code: reader.scalar("code")?,
            text: reader.scalar("text")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("code", &self.code);
        writer.scalar("text", &self.text);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonError {
    pub person_identification: PersonIdentification,
    pub error_info: Vec<ErrorInfo>,
}

impl EchModel for PersonError {
    fn descriptor() -> &'static ModelDescriptor {
        &PERSON_ERROR
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            person_identification: reader.record("personIdentification")?,
            error_info: reader.records("errorInfo")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.record("personIdentification", &self.person_identification);
        writer.records("errorInfo", &self.error_info);
    }
}

/// The federal office's answer to a delivery with errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub version: String,
    pub validation_report_header: Header,
    pub general_error: Vec<ErrorInfo>,
    pub person_error: Vec<PersonError>,
    pub general_data: Vec<Data>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.general_error.len() + self.person_error.iter().map(|p| p.error_info.len()).sum::<usize>()
    }
}

impl EchModel for ValidationReport {
    fn descriptor() -> &'static ModelDescriptor {
        &VALIDATION_REPORT
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            version: reader.attribute("version")?,
            validation_report_header: reader.record("validationReportHeader")?,
            general_error: reader.records("generalError")?,
            person_error: reader.records("personError")?,
            general_data: reader.records("generalData")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.attribute("version", &self.version);
        writer.record("validationReportHeader", &self.validation_report_header);
        writer.records("generalError", &self.general_error);
        writer.records("personError", &self.person_error);
        writer.records("generalData", &self.general_data);
    }
}

/// Acknowledgement of an accepted delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub version: String,
    pub receipt_header: Header,
    pub event_time: NaiveDate,
}

impl EchModel for Receipt {
    fn descriptor() -> &'static ModelDescriptor {
        &RECEIPT
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            version: reader.attribute("version")?,
            receipt_header: reader.record("receiptHeader")?,
            event_time: reader.scalar("eventTime")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.attribute("version", &self.version);
        writer.record("receiptHeader", &self.receipt_header);
        writer.scalar("eventTime", &self.event_time);
    }
}
