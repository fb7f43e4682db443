//! Whole documents, recognised by their root element.

use openmun_serde::{
    Catalog, CodecError, Element, SerializeOptions, ValidationError, ValidationReason,
};
use tracing::debug;

use crate::ech0020::EventDelivery;
use crate::ech0099;
use crate::namespaces::{ECH0020_V3, ECH0099_V2};

/// Any root document this crate understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// eCH-0020 registry event delivery.
    EventDelivery(Box<EventDelivery>),
    /// eCH-0099 statistics delivery.
    StatisticsDelivery(Box<ech0099::Delivery>),
    ValidationReport(Box<ech0099::ValidationReport>),
    Receipt(Box<ech0099::Receipt>),
}

impl Document {
    /// Parses a document, picking the model from the root's namespace and name.
    pub fn from_element(catalog: &Catalog, root: &Element) -> Result<Self, CodecError> {
        let schema = catalog.registry().schema_for(&root.name.namespace);
        let document = match (schema, root.name.local.as_str()) {
            (Some(ECH0020_V3), "delivery") => {
                Document::EventDelivery(Box::new(catalog.dispatch_document(root)?))
            }
            (Some(ECH0099_V2), "delivery") => Document::StatisticsDelivery(Box::new(catalog.from_xml(root)?)),
            (Some(ECH0099_V2), "validationReport") => {
                Document::ValidationReport(Box::new(catalog.from_xml(root)?))
            }
            (Some(ECH0099_V2), "receipt") => Document::Receipt(Box::new(catalog.from_xml(root)?)),
            _ => {
                return Err(ValidationError::new(
                    "document",
                    "",
                    ValidationReason::UnexpectedElement {
                        element: root.name.to_string(),
                    },
                )
                .into());
            }
        };
        debug!(kind = document.kind(), "Parsed document");
        Ok(document)
    }

    pub fn from_xml_str(catalog: &Catalog, xml: &str) -> Result<Self, CodecError> {
        let root = Element::parse(xml)?;
        Self::from_element(catalog, &root)
    }

    /// Short name of the document kind, for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::EventDelivery(_) => "eCH-0020 delivery",
            Document::StatisticsDelivery(_) => "eCH-0099 delivery",
            Document::ValidationReport(_) => "eCH-0099 validationReport",
            Document::Receipt(_) => "eCH-0099 receipt",
        }
    }

    pub fn to_element(&self, catalog: &Catalog) -> Result<Element, CodecError> {
        let options = SerializeOptions::default();
        match self {
            Document::EventDelivery(delivery) => catalog.envelope_to_element(delivery.as_ref()),
            Document::StatisticsDelivery(delivery) => catalog.to_element(delivery.as_ref(), &options),
            Document::ValidationReport(report) => catalog.to_element(report.as_ref(), &options),
            Document::Receipt(receipt) => catalog.to_element(receipt.as_ref(), &options),
        }
    }

    pub fn to_xml_string(&self, catalog: &Catalog) -> Result<String, CodecError> {
        let root = self.to_element(catalog)?;
        catalog.write_document(&root)
    }
}

impl From<EventDelivery> for Document {
    fn from(delivery: EventDelivery) -> Self {
        Document::EventDelivery(Box::new(delivery))
    }
}

impl From<ech0099::Delivery> for Document {
    fn from(delivery: ech0099::Delivery) -> Self {
        Document::StatisticsDelivery(Box::new(delivery))
    }
}

impl From<ech0099::ValidationReport> for Document {
    fn from(report: ech0099::ValidationReport) -> Self {
        Document::ValidationReport(Box::new(report))
    }
}

impl From<ech0099::Receipt> for Document {
    fn from(receipt: ech0099::Receipt) -> Self {
        Document::Receipt(Box::new(receipt))
    }
}
