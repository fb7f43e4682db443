//! eCH-0058 message headers.
//!
//! Versions 4 and 5 share one structure, so there is a single descriptor
//! declared in the v5 schema. Documents that still carry v4 headers place
//! the same fields in the v4 namespace through a field namespace override,
//! see [`crate::ech0099`].

use openmun_serde::{
    EchModel, Element, FieldDescriptor, ModelDescriptor, RecordReader, RecordWriter, ScalarKind,
    ValidationError, XsDateTime,
};

use crate::codes::Action;
use crate::namespaces::ECH0058_V5;

pub static SENDING_APPLICATION: ModelDescriptor = ModelDescriptor {
    schema: ECH0058_V5,
    name: "sendingApplicationType",
    element: "sendingApplication",
    base: None,
    fields: &[
        FieldDescriptor::scalar("manufacturer", ScalarKind::text(1, 30)),
        FieldDescriptor::scalar("product", ScalarKind::text(1, 30)),
        FieldDescriptor::scalar("productVersion", ScalarKind::text(1, 10)),
    ],
    attributes: &[],
};

pub static PARTIAL_DELIVERY: ModelDescriptor = ModelDescriptor {
    schema: ECH0058_V5,
    name: "partialDeliveryType",
    element: "partialDelivery",
    base: None,
    fields: &[
        FieldDescriptor::scalar("uniqueIdDelivery", ScalarKind::text(1, 50)),
        FieldDescriptor::scalar("totalNumberOfPackages", ScalarKind::range(1, i64::MAX)),
        FieldDescriptor::scalar("numberOfActualPackage", ScalarKind::range(1, i64::MAX)),
    ],
    attributes: &[],
};

pub static NAMED_META_DATA: ModelDescriptor = ModelDescriptor {
    schema: ECH0058_V5,
    name: "namedMetaDataType",
    element: "namedMetaData",
    base: None,
    fields: &[
        FieldDescriptor::scalar("metaDataName", ScalarKind::text(1, 20)),
        FieldDescriptor::scalar("metaDataValue", ScalarKind::text(1, 50)),
    ],
    attributes: &[],
};

pub static HEADER: ModelDescriptor = ModelDescriptor {
    schema: ECH0058_V5,
    name: "headerType",
    element: "header",
    base: None,
    fields: &[
        FieldDescriptor::scalar("senderId", ScalarKind::text(1, 50)),
        FieldDescriptor::scalar("originalSenderId", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("declarationLocalReference", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("recipientId", ScalarKind::text(1, 50)).many(),
        FieldDescriptor::scalar("messageId", ScalarKind::text(1, 36)),
        FieldDescriptor::scalar("referenceMessageId", ScalarKind::text(1, 36)).optional(),
        FieldDescriptor::scalar("businessProcessId", ScalarKind::text(1, 128)).optional(),
        FieldDescriptor::scalar("ourBusinessReferenceId", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("yourBusinessReferenceId", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("uniqueIdBusinessTransaction", ScalarKind::text(1, 50)).optional(),
        FieldDescriptor::scalar("messageType", ScalarKind::text(1, 36)),
        FieldDescriptor::scalar("subMessageType", ScalarKind::text(1, 36)).optional(),
        FieldDescriptor::model("sendingApplication", &SENDING_APPLICATION),
        FieldDescriptor::model("partialDelivery", &PARTIAL_DELIVERY).optional(),
        FieldDescriptor::scalar("subject", ScalarKind::text(1, 100)).optional(),
        FieldDescriptor::scalar("comment", ScalarKind::text(1, 250)).optional(),
        FieldDescriptor::scalar("messageDate", ScalarKind::DateTime),
        FieldDescriptor::scalar("initialMessageDate", ScalarKind::DateTime).optional(),
        FieldDescriptor::scalar("eventDate", ScalarKind::Date).optional(),
        FieldDescriptor::scalar("modificationDate", ScalarKind::DateTime).optional(),
        FieldDescriptor::scalar("action", ScalarKind::Code(Action::CODES)),
        FieldDescriptor::any("attachment").many(),
        FieldDescriptor::scalar("testDeliveryFlag", ScalarKind::Boolean),
        FieldDescriptor::scalar("responseExpected", ScalarKind::Boolean).optional(),
        FieldDescriptor::scalar("businessCaseClosed", ScalarKind::Boolean).optional(),
        FieldDescriptor::model("namedMetaData", &NAMED_META_DATA).many(),
        FieldDescriptor::any("extension").optional(),
    ],
    attributes: &[],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendingApplication {
    pub manufacturer: String,
    pub product: String,
    pub product_version: String,
}

impl SendingApplication {
    pub fn new(
        manufacturer: impl Into<String>,
        product: impl Into<String>,
        product_version: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            product: product.into(),
            product_version: product_version.into(),
        }
    }
}

impl EchModel for SendingApplication {
    fn descriptor() -> &'static ModelDescriptor {
        &SENDING_APPLICATION
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            manufacturer: reader.scalar("manufacturer")?,
            product: reader.scalar("product")?,
            product_version: reader.scalar("productVersion")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("manufacturer", &self.manufacturer);
        writer.scalar("product", &self.product);
        writer.scalar("productVersion", &self.product_version);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialDelivery {
    pub unique_id_delivery: String,
    pub total_number_of_packages: u32,
    pub number_of_actual_package: u32,
}

impl EchModel for PartialDelivery {
    fn descriptor() -> &'static ModelDescriptor {
        &PARTIAL_DELIVERY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            unique_id_delivery: reader.scalar("uniqueIdDelivery")?,
            total_number_of_packages: reader.scalar("totalNumberOfPackages")?,
            number_of_actual_package: reader.scalar("numberOfActualPackage")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("uniqueIdDelivery", &self.unique_id_delivery);
        writer.scalar("totalNumberOfPackages", &self.total_number_of_packages);
        writer.scalar("numberOfActualPackage", &self.number_of_actual_package);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMetaData {
    pub meta_data_name: String,
    pub meta_data_value: String,
}

impl EchModel for NamedMetaData {
    fn descriptor() -> &'static ModelDescriptor {
        &NAMED_META_DATA
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            meta_data_name: reader.scalar("metaDataName")?,
            meta_data_value: reader.scalar("metaDataValue")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("metaDataName", &self.meta_data_name);
        writer.scalar("metaDataValue", &self.meta_data_value);
    }
}

/// Routing and bookkeeping data of an eCH message.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub sender_id: String,
    pub original_sender_id: Option<String>,
    pub declaration_local_reference: Option<String>,
    pub recipient_id: Vec<String>,
    pub message_id: String,
    pub reference_message_id: Option<String>,
    pub business_process_id: Option<String>,
    pub our_business_reference_id: Option<String>,
    pub your_business_reference_id: Option<String>,
    pub unique_id_business_transaction: Option<String>,
    pub message_type: String,
    pub sub_message_type: Option<String>,
    pub sending_application: SendingApplication,
    pub partial_delivery: Option<PartialDelivery>,
    pub subject: Option<String>,
    pub comment: Option<String>,
    pub message_date: XsDateTime,
    pub initial_message_date: Option<XsDateTime>,
    pub event_date: Option<chrono::NaiveDate>,
    pub modification_date: Option<XsDateTime>,
    pub action: Action,
    pub attachment: Vec<Element>,
    pub test_delivery_flag: bool,
    pub response_expected: Option<bool>,
    pub business_case_closed: Option<bool>,
    pub named_meta_data: Vec<NamedMetaData>,
    pub extension: Option<Element>,
}

impl Header {
    /// A header with only the required fields set.
    pub fn new(
        sender_id: impl Into<String>,
        message_id: impl Into<String>,
        message_type: impl Into<String>,
        sending_application: SendingApplication,
        message_date: XsDateTime,
        action: Action,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            original_sender_id: None,
            declaration_local_reference: None,
            recipient_id: Vec::new(),
            message_id: message_id.into(),
            reference_message_id: None,
            business_process_id: None,
            our_business_reference_id: None,
            your_business_reference_id: None,
            unique_id_business_transaction: None,
            message_type: message_type.into(),
            sub_message_type: None,
            sending_application,
            partial_delivery: None,
            subject: None,
            comment: None,
            message_date,
            initial_message_date: None,
            event_date: None,
            modification_date: None,
            action,
            attachment: Vec::new(),
            test_delivery_flag: false,
            response_expected: None,
            business_case_closed: None,
            named_meta_data: Vec::new(),
            extension: None,
        }
    }

    pub(crate) fn read_fields(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            sender_id: reader.scalar("senderId")?,
            original_sender_id: reader.opt_scalar("originalSenderId")?,
            declaration_local_reference: reader.opt_scalar("declarationLocalReference")?,
            recipient_id: reader.scalars("recipientId")?,
            message_id: reader.scalar("messageId")?,
            reference_message_id: reader.opt_scalar("referenceMessageId")?,
            business_process_id: reader.opt_scalar("businessProcessId")?,
            our_business_reference_id: reader.opt_scalar("ourBusinessReferenceId")?,
            your_business_reference_id: reader.opt_scalar("yourBusinessReferenceId")?,
            unique_id_business_transaction: reader.opt_scalar("uniqueIdBusinessTransaction")?,
            message_type: reader.scalar("messageType")?,
            sub_message_type: reader.opt_scalar("subMessageType")?,
            sending_application: reader.record("sendingApplication")?,
            partial_delivery: reader.opt_record("partialDelivery")?,
            subject: reader.opt_scalar("subject")?,
            comment: reader.opt_scalar("comment")?,
            message_date: reader.scalar("messageDate")?,
            initial_message_date: reader.opt_scalar("initialMessageDate")?,
            event_date: reader.opt_scalar("eventDate")?,
            modification_date: reader.opt_scalar("modificationDate")?,
            action: reader.scalar("action")?,
            attachment: reader.anys("attachment")?,
            test_delivery_flag: reader.scalar("testDeliveryFlag")?,
            response_expected: reader.opt_scalar("responseExpected")?,
            business_case_closed: reader.opt_scalar("businessCaseClosed")?,
            named_meta_data: reader.records("namedMetaData")?,
            extension: reader.opt_any("extension")?,
        })
    }

    pub(crate) fn write_fields(&self, writer: &mut RecordWriter) {
        writer.scalar("senderId", &self.sender_id);
        writer.opt_scalar("originalSenderId", &self.original_sender_id);
        writer.opt_scalar("declarationLocalReference", &self.declaration_local_reference);
        writer.scalars("recipientId", &self.recipient_id);
        writer.scalar("messageId", &self.message_id);
        writer.opt_scalar("referenceMessageId", &self.reference_message_id);
        writer.opt_scalar("businessProcessId", &self.business_process_id);
        writer.opt_scalar("ourBusinessReferenceId", &self.our_business_reference_id);
        writer.opt_scalar("yourBusinessReferenceId", &self.your_business_reference_id);
        writer.opt_scalar("uniqueIdBusinessTransaction", &self.unique_id_business_transaction);
        writer.scalar("messageType", &self.message_type);
        writer.opt_scalar("subMessageType", &self.sub_message_type);
        writer.record("sendingApplication", &self.sending_application);
        writer.opt_record("partialDelivery", &self.partial_delivery);
        writer.opt_scalar("subject", &self.subject);
        writer.opt_scalar("comment", &self.comment);
        writer.scalar("messageDate", &self.message_date);
        writer.opt_scalar("initialMessageDate", &self.initial_message_date);
        writer.opt_scalar("eventDate", &self.event_date);
        writer.opt_scalar("modificationDate", &self.modification_date);
        writer.scalar("action", &self.action);
        writer.anys("attachment", &self.attachment);
        writer.scalar("testDeliveryFlag", &self.test_delivery_flag);
        writer.opt_scalar("responseExpected", &self.response_expected);
        writer.opt_scalar("businessCaseClosed", &self.business_case_closed);
        writer.records("namedMetaData", &self.named_meta_data);
        writer.opt_any("extension", &self.extension);
    }
}

impl EchModel for Header {
    fn descriptor() -> &'static ModelDescriptor {
        &HEADER
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Self::read_fields(reader)
    }

    fn write(&self, writer: &mut RecordWriter) {
        self.write_fields(writer);
    }
}
