//! # OpenMun eCH Catalog
//!
//! Typed models for the Swiss municipal-registry standards, described as
//! static descriptor tables for the [`openmun_serde`] codec engine.
//!
//! | module | standard |
//! |--------|----------|
//! | [`ech0007`] | eCH-0007 v5 municipalities |
//! | [`ech0008`] | eCH-0008 v3 countries |
//! | [`ech0010`] | eCH-0010 v5 postal addresses |
//! | [`ech0011`] | eCH-0011 v8 person data (subset) |
//! | [`ech0020`] | eCH-0020 v3 registry events |
//! | [`ech0044`] | eCH-0044 v4 person identification |
//! | [`ech0058`] | eCH-0058 v4/v5 message headers |
//! | [`ech0099`] | eCH-0099 v2 statistics deliveries |
//!
//! ## Examples
//!
//! ```ignore
//! use openmun_ech::{Document, catalog};
//!
//! let catalog = catalog()?;
//! let document = Document::from_xml_str(catalog, &xml)?;
//! let exported = document.to_xml_string(catalog)?;
//! let report = catalog.verify(&Element::parse(&xml)?, &Element::parse(&exported)?);
//! assert!(report.is_lossless);
//! ```

pub mod catalog;
pub mod codes;
pub mod document;
pub mod ech0007;
pub mod ech0008;
pub mod ech0010;
pub mod ech0011;
pub mod ech0020;
pub mod ech0044;
pub mod ech0058;
pub mod ech0099;
pub mod namespaces;
pub mod validation;

pub use catalog::catalog;
pub use document::Document;
pub use ech0020::{Event, EventDelivery};
pub use validation::{Advisor, InMemoryDirectory, MunicipalityAdvisor, Severity, Warning};
