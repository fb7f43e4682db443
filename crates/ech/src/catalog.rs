//! The process-wide catalog of every eCH model this crate defines.

use once_cell::sync::Lazy;
use openmun_serde::{Catalog, SchemaDefinitionError};
use tracing::error;

use crate::{ech0007, ech0008, ech0010, ech0011, ech0020, ech0044, ech0058, ech0099, namespaces};

static CATALOG: Lazy<Result<Catalog, SchemaDefinitionError>> = Lazy::new(|| {
    let catalog = build();
    if let Err(e) = &catalog {
        error!(error = %e, "eCH catalog failed to build");
    }
    catalog
});

/// Builds a fresh catalog. Most callers want the shared [`catalog`].
pub fn build() -> Result<Catalog, SchemaDefinitionError> {
    Catalog::builder(namespaces::registry()?)
        .models([
            &ech0007::SWISS_MUNICIPALITY,
            &ech0007::SWISS_AND_FL_MUNICIPALITY,
            &ech0008::COUNTRY,
            &ech0008::COUNTRY_SHORT,
            &ech0010::MAIL_ADDRESS,
            &ech0010::SWISS_ADDRESS_INFORMATION,
            &ech0044::PERSON_IDENTIFICATION,
            &ech0044::PERSON_IDENTIFICATION_LIGHT,
            &ech0044::PERSON_IDENTIFICATION_KEY_ONLY,
            &ech0058::HEADER,
            &ech0011::REPORTED_PERSON,
            &ech0099::DELIVERY,
            &ech0099::VALIDATION_REPORT,
            &ech0099::RECEIPT,
        ])
        .envelope(&ech0020::DELIVERY_ENVELOPE)
        .build()
}

/// The shared catalog, built on first use.
///
/// A definition defect is reported on every call, never papered over.
pub fn catalog() -> Result<&'static Catalog, SchemaDefinitionError> {
    CATALOG.as_ref().map_err(Clone::clone)
}
