//! eCH-0007 v5: municipalities.

use openmun_serde::{
    EchModel, FieldDescriptor, ModelDescriptor, RecordReader, RecordWriter, ScalarKind,
    ValidationError,
};

use crate::codes::{Canton, CantonFl};
use crate::namespaces::ECH0007_V5;

pub static SWISS_MUNICIPALITY: ModelDescriptor = ModelDescriptor {
    schema: ECH0007_V5,
    name: "swissMunicipalityType",
    element: "swissMunicipality",
    base: None,
    fields: &[
        FieldDescriptor::scalar("municipalityId", ScalarKind::range(1, 9999)).optional(),
        FieldDescriptor::scalar("municipalityName", ScalarKind::text(1, 40)),
        FieldDescriptor::scalar("cantonAbbreviation", ScalarKind::Code(Canton::CODES)).optional(),
        FieldDescriptor::scalar("historyMunicipalityId", ScalarKind::text(1, 12)).optional(),
    ],
    attributes: &[],
};

pub static SWISS_AND_FL_MUNICIPALITY: ModelDescriptor = ModelDescriptor {
    schema: ECH0007_V5,
    name: "swissAndFlMunicipalityType",
    element: "swissAndFlMunicipality",
    base: None,
    fields: &[
        FieldDescriptor::scalar("municipalityId", ScalarKind::range(1, 9999)),
        FieldDescriptor::scalar("municipalityName", ScalarKind::text(1, 40)),
        FieldDescriptor::scalar("cantonFlAbbreviation", ScalarKind::Code(CantonFl::CODES)),
        FieldDescriptor::scalar("historyMunicipalityId", ScalarKind::text(1, 12)).optional(),
    ],
    attributes: &[],
};

/// A Swiss municipality, identified by its BFS number where known.
#[derive(Debug, Clone, PartialEq)]
pub struct SwissMunicipality {
    pub municipality_id: Option<u16>,
    pub municipality_name: String,
    pub canton_abbreviation: Option<Canton>,
    pub history_municipality_id: Option<String>,
}

impl SwissMunicipality {
    pub fn new(municipality_id: u16, name: impl Into<String>, canton: Canton) -> Self {
        Self {
            municipality_id: Some(municipality_id),
            municipality_name: name.into(),
            canton_abbreviation: Some(canton),
            history_municipality_id: None,
        }
    }
}

impl EchModel for SwissMunicipality {
    fn descriptor() -> &'static ModelDescriptor {
        &SWISS_MUNICIPALITY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            municipality_id: reader.opt_scalar("municipalityId")?,
            municipality_name: reader.scalar("municipalityName")?,
            canton_abbreviation: reader.opt_scalar("cantonAbbreviation")?,
            history_municipality_id: reader.opt_scalar("historyMunicipalityId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.opt_scalar("municipalityId", &self.municipality_id);
        writer.scalar("municipalityName", &self.municipality_name);
        writer.opt_scalar("cantonAbbreviation", &self.canton_abbreviation);
        writer.opt_scalar("historyMunicipalityId", &self.history_municipality_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwissAndFlMunicipality {
    pub municipality_id: u16,
    pub municipality_name: String,
    pub canton_fl_abbreviation: CantonFl,
    pub history_municipality_id: Option<String>,
}

impl EchModel for SwissAndFlMunicipality {
    fn descriptor() -> &'static ModelDescriptor {
        &SWISS_AND_FL_MUNICIPALITY
    }

    fn read(reader: &mut RecordReader) -> Result<Self, ValidationError> {
        Ok(Self {
            municipality_id: reader.scalar("municipalityId")?,
            municipality_name: reader.scalar("municipalityName")?,
            canton_fl_abbreviation: reader.scalar("cantonFlAbbreviation")?,
            history_municipality_id: reader.opt_scalar("historyMunicipalityId")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.scalar("municipalityId", &self.municipality_id);
        writer.scalar("municipalityName", &self.municipality_name);
        writer.scalar("cantonFlAbbreviation", &self.canton_fl_abbreviation);
        writer.opt_scalar("historyMunicipalityId", &self.history_municipality_id);
    }
}
