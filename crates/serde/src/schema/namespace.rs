use std::collections::HashMap;

use crate::error::SchemaDefinitionError;
use crate::xml::QName;

use super::SchemaId;

/// Namespace of `xsi:` attributes. They carry schema hints, not content.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// One registered schema namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    pub schema: SchemaId,
    pub uri: String,
    /// Prefix used when writing documents.
    pub prefix: String,
    /// Additional URIs accepted on read for the same schema.
    pub aliases: Vec<String>,
}

impl NamespaceEntry {
    pub fn new(schema: SchemaId, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            schema,
            uri: uri.into(),
            prefix: prefix.into(),
            aliases: Vec::new(),
        }
    }

    /// Entry with the canonical eCH URI and a prefix derived from the family,
    /// e.g. `eCH-0010`.
    pub fn ech(schema: SchemaId) -> Self {
        Self::new(schema, schema.canonical_uri(), schema.family)
    }

    pub fn with_alias(mut self, uri: impl Into<String>) -> Self {
        self.aliases.push(uri.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Bidirectional map between schema identifiers and namespace URIs.
///
/// Built once; there is no mutation API after [`NamespaceRegistry::new`].
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    entries: Vec<NamespaceEntry>,
    by_schema: HashMap<SchemaId, usize>,
    by_uri: HashMap<String, usize>,
}

impl NamespaceRegistry {
    pub fn new(
        entries: impl IntoIterator<Item = NamespaceEntry>,
    ) -> Result<Self, SchemaDefinitionError> {
        let entries: Vec<NamespaceEntry> = entries.into_iter().collect();
        let mut by_schema = HashMap::new();
        let mut by_uri = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if by_schema.insert(entry.schema, index).is_some() {
                return Err(SchemaDefinitionError::DuplicateNamespace(
                    entry.schema.to_string(),
                ));
            }
            for uri in std::iter::once(&entry.uri).chain(entry.aliases.iter()) {
                if by_uri.insert(uri.clone(), index).is_some() {
                    return Err(SchemaDefinitionError::DuplicateNamespace(uri.clone()));
                }
            }
        }

        let mut prefixes: Vec<&str> = entries.iter().map(|e| e.prefix.as_str()).collect();
        prefixes.sort_unstable();
        if let Some(pair) = prefixes.windows(2).find(|w| w[0] == w[1]) {
            return Err(SchemaDefinitionError::DuplicateNamespace(format!(
                "prefix {}",
                pair[0]
            )));
        }

        Ok(Self {
            entries,
            by_schema,
            by_uri,
        })
    }

    pub fn entries(&self) -> &[NamespaceEntry] {
        &self.entries
    }

    pub fn contains(&self, schema: SchemaId) -> bool {
        self.by_schema.contains_key(&schema)
    }

    /// Canonical URI of a schema.
    pub fn namespace_for(&self, schema: SchemaId) -> Option<&str> {
        self.entry(schema).map(|e| e.uri.as_str())
    }

    /// Schema of a canonical or alias URI.
    pub fn schema_for(&self, uri: &str) -> Option<SchemaId> {
        self.by_uri.get(uri).map(|&i| self.entries[i].schema)
    }

    /// Preferred prefix for a canonical or alias URI.
    pub fn prefix_for_uri(&self, uri: &str) -> Option<&str> {
        self.by_uri.get(uri).map(|&i| self.entries[i].prefix.as_str())
    }

    pub fn qualify(&self, local: &str, schema: SchemaId) -> Result<QName, SchemaDefinitionError> {
        let uri = self.namespace_for(schema).ok_or_else(|| {
            SchemaDefinitionError::UnregisteredNamespace {
                model: local.to_string(),
                schema: schema.to_string(),
            }
        })?;
        Ok(QName::new(uri, local))
    }

    /// Splits a qualified tag into its local name and schema. `None` when the
    /// namespace is not registered.
    pub fn unqualify<'a>(&self, name: &'a QName) -> Option<(&'a str, SchemaId)> {
        self.schema_for(&name.namespace)
            .map(|schema| (name.local.as_str(), schema))
    }

    /// Rewrites alias URIs to the canonical URI of their schema.
    pub fn canonical(&self, name: &QName) -> QName {
        match self.schema_for(&name.namespace).and_then(|s| self.namespace_for(s)) {
            Some(uri) if uri != name.namespace => QName::new(uri, name.local.clone()),
            _ => name.clone(),
        }
    }

    fn entry(&self, schema: SchemaId) -> Option<&NamespaceEntry> {
        self.by_schema.get(&schema).map(|&i| &self.entries[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: SchemaId = SchemaId::new("eCH-0010", 5);
    const EVENTS: SchemaId = SchemaId::new("eCH-0020", 3);

    fn registry() -> NamespaceRegistry {
        NamespaceRegistry::new([
            NamespaceEntry::ech(ADDRESS),
            NamespaceEntry::ech(EVENTS).with_alias("http://www.ech.ch/xmlns/eCH-0020-3/3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip_lookups() {
        let registry = registry();
        assert_eq!(
            registry.namespace_for(ADDRESS),
            Some("http://www.ech.ch/xmlns/eCH-0010/5")
        );
        assert_eq!(
            registry.schema_for("http://www.ech.ch/xmlns/eCH-0010/5"),
            Some(ADDRESS)
        );
        let tag = registry.qualify("town", ADDRESS).unwrap();
        assert_eq!(registry.unqualify(&tag), Some(("town", ADDRESS)));
        assert!(registry.qualify("town", SchemaId::new("eCH-0011", 8)).is_err());
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let registry = registry();
        let alias = QName::new("http://www.ech.ch/xmlns/eCH-0020-3/3", "delivery");
        assert_eq!(registry.unqualify(&alias), Some(("delivery", EVENTS)));
        assert_eq!(
            registry.canonical(&alias).namespace,
            "http://www.ech.ch/xmlns/eCH-0020/3"
        );
        assert_eq!(registry.prefix_for_uri(&alias.namespace), Some("eCH-0020"));
    }

    #[test]
    fn test_unknown_namespace_is_not_guessed() {
        let registry = registry();
        let bare = QName::new("urn:other", "town");
        assert_eq!(registry.unqualify(&bare), None);
        assert_eq!(registry.canonical(&bare), bare);
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = NamespaceRegistry::new([NamespaceEntry::ech(ADDRESS), NamespaceEntry::ech(ADDRESS)])
            .unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::DuplicateNamespace(_)));

        let err = NamespaceRegistry::new([
            NamespaceEntry::ech(ADDRESS),
            NamespaceEntry::new(EVENTS, "http://www.ech.ch/xmlns/eCH-0010/5", "ev"),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::DuplicateNamespace(_)));
    }
}
