//! eCH-0008 v3: countries.

use openmun_serde::{
    EchModel, FieldDescriptor, ModelDescriptor, RecordReader, RecordWriter, ScalarKind,
    ValidationError,
};

use crate::namespaces::ECH0008_V3;

pub static COUNTRY: ModelDescriptor = ModelDescriptor {
    schema: ECH0008_V3,
    name: "countryType",
    element: "country",
    base: None,
    fields: &[
        FieldDescriptor::scalar("countryId", ScalarKind::range(1000, 9999)).optional(),
        FieldDescriptor::scalar("countryIdISO2", ScalarKind::pattern("[A-Z]{2}")).optional(),
        FieldDescriptor::scalar("countryNameShort", ScalarKind::text(1, 50)),
    ],
    attributes: &[],
};

pub static COUNTRY_SHORT: ModelDescriptor = ModelDescriptor {
    schema: ECH0008_V3,
    name: "countryShortType",
    element: "countryShort",
    base: None,
    fields: &[FieldDescriptor::scalar("countryNameShort", ScalarKind::text(1, 50))],
    attributes: &[],
};

/// A country by BFS number and ISO code.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub country_id: Option<u16>,
    pub country_id_iso2: Option<String>,
    pub country_name_short: String,
}

impl Country {
    pub fn switzerland() -> Self {
        Self {
            country_id: Some(8100),
            country_id_iso2: Some("CH".into()),
            country_name_short: "Schweiz".into(),
        }
    }
}

impl EchModel for Country {
    fn descriptor() -> &'static ModelDescriptor {
        &COUNTRY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            country_id: reader.opt_scalar("countryId")?,
            country_id_iso2: reader.opt_scalar("countryIdISO2")?,
            country_name_short: reader.scalar("countryNameShort")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("countryId", &self.country_id);
        writer.opt_scalar("countryIdISO2", &self.country_id_iso2);
        writer.scalar("countryNameShort", &self.country_name_short);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryShort {
    pub country_name_short: String,
}

impl EchModel for CountryShort {
    fn descriptor() -> &'static ModelDescriptor {
        &COUNTRY_SHORT
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            country_name_short: reader.scalar("countryNameShort")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("countryNameShort", &self.country_name_short);
    }
}
