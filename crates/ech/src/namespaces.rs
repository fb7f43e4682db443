//! Schema identifiers and the namespace registry of the catalog.

use openmun_serde::{NamespaceEntry, NamespaceRegistry, SchemaDefinitionError, SchemaId};

pub const ECH0007_V5: SchemaId = SchemaId::new("eCH-0007", 5);
pub const ECH0008_V3: SchemaId = SchemaId::new("eCH-0008", 3);
pub const ECH0010_V5: SchemaId = SchemaId::new("eCH-0010", 5);
pub const ECH0011_V8: SchemaId = SchemaId::new("eCH-0011", 8);
pub const ECH0020_V3: SchemaId = SchemaId::new("eCH-0020", 3);
pub const ECH0044_V4: SchemaId = SchemaId::new("eCH-0044", 4);
pub const ECH0058_V4: SchemaId = SchemaId::new("eCH-0058", 4);
pub const ECH0058_V5: SchemaId = SchemaId::new("eCH-0058", 5);
pub const ECH0099_V2: SchemaId = SchemaId::new("eCH-0099", 2);

/// Alternative URI some producers emit for eCH-0020 v3.
pub const ECH0020_V3_ALIAS: &str = "http://www.ech.ch/xmlns/eCH-0020-3/3";

/// Every schema version the catalog knows, with its preferred prefix.
pub fn registry() -> Result<NamespaceRegistry, SchemaDefinitionError> {
    NamespaceRegistry::new(vec![
        NamespaceEntry::ech(ECH0007_V5),
        NamespaceEntry::ech(ECH0008_V3),
        NamespaceEntry::ech(ECH0010_V5),
        NamespaceEntry::ech(ECH0011_V8),
        NamespaceEntry::ech(ECH0020_V3).with_alias(ECH0020_V3_ALIAS),
        NamespaceEntry::ech(ECH0044_V4),
        // Both eCH-0058 versions are live: eCH-0099 still carries v4 headers.
        NamespaceEntry::ech(ECH0058_V4).with_prefix("eCH-0058-4"),
        NamespaceEntry::ech(ECH0058_V5),
        NamespaceEntry::ech(ECH0099_V2),
    ])
}
