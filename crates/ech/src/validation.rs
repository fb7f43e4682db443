//! Advisory data-quality checks.
//!
//! Advisors look at a record that already passed structural validation and
//! report [`Warning`]s. They never fail and never change the record. The
//! codec does not call them; applications decide what to do with warnings.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::codes::Canton;
use crate::ech0007::SwissMunicipality;
use crate::ech0011::Place;
use crate::ech0020::{Event, EventDelivery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// A possible data-quality issue. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub field: String,
    pub value: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)
    }
}

/// A non-blocking check over a completed record.
pub trait Advisor<T: ?Sized> {
    fn advise(&self, value: &T) -> Vec<Warning>;
}

/// A municipality as listed in the federal register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityEntry {
    pub bfs_id: u16,
    pub name: String,
    pub canton: Canton,
}

/// Lookup of municipalities by BFS number.
pub trait MunicipalityDirectory {
    fn by_bfs_id(&self, bfs_id: u16) -> Option<&MunicipalityEntry>;

    /// False when no reference data is loaded.
    fn is_available(&self) -> bool {
        true
    }
}

/// A directory held in memory, e.g. loaded from an open-data export.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entries: HashMap<u16, MunicipalityEntry>,
}

impl InMemoryDirectory {
    pub fn new(entries: impl IntoIterator<Item = MunicipalityEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.bfs_id, e)).collect(),
        }
    }

    pub fn insert(&mut self, bfs_id: u16, name: impl Into<String>, canton: Canton) {
        self.entries.insert(
            bfs_id,
            MunicipalityEntry {
                bfs_id,
                name: name.into(),
                canton,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MunicipalityDirectory for InMemoryDirectory {
    fn by_bfs_id(&self, bfs_id: u16) -> Option<&MunicipalityEntry> {
        self.entries.get(&bfs_id)
    }

    fn is_available(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Checks BFS numbers, names and cantons of Swiss municipalities.
///
/// An empty directory disables the checks.
pub struct MunicipalityAdvisor<D> {
    directory: D,
}

impl<D: MunicipalityDirectory> MunicipalityAdvisor<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    fn check(&self, field: &str, municipality: &SwissMunicipality, warnings: &mut Vec<Warning>) {
        if !self.directory.is_available() {
            return;
        }
        let Some(bfs_id) = municipality.municipality_id else {
            return;
        };
        let found = match self.directory.by_bfs_id(bfs_id) {
            Some(entry) => entry,
            None => {
                warnings.push(Warning {
                    field: format!("{}/municipalityId", field),
                    value: bfs_id.to_string(),
                    severity: Severity::Warning,
                    message: format!(
                        "BFS number {} not found in the municipality directory (name given: {})",
                        bfs_id, municipality.municipality_name
                    ),
                    suggestions: Vec::new(),
                });
                return;
            }
        };

        if found.name.to_lowercase() != municipality.municipality_name.trim().to_lowercase() {
            warnings.push(Warning {
                field: format!("{}/municipalityName", field),
                value: municipality.municipality_name.clone(),
                severity: Severity::Warning,
                message: format!("BFS number {} is registered as {}", bfs_id, found.name),
                suggestions: vec![found.name.clone()],
            });
        }

        if let Some(canton) = municipality.canton_abbreviation
            && canton != found.canton
        {
            warnings.push(Warning {
                field: format!("{}/cantonAbbreviation", field),
                value: canton.to_string(),
                severity: Severity::Warning,
                message: format!("{} belongs to canton {}", found.name, found.canton),
                suggestions: vec![found.canton.to_string()],
            });
        }
    }

    fn check_place(&self, field: &str, place: &Place, warnings: &mut Vec<Warning>) {
        if let Place::SwissTown(municipality) = place {
            self.check(&format!("{}/swissTown", field), municipality, warnings);
        }
    }
}

fn log(warnings: &[Warning]) {
    for w in warnings {
        warn!(field = %w.field, value = %w.value, severity = %w.severity, "{}", w.message);
    }
}

impl<D: MunicipalityDirectory> Advisor<SwissMunicipality> for MunicipalityAdvisor<D> {
    fn advise(&self, value: &SwissMunicipality) -> Vec<Warning> {
        let mut warnings = Vec::new();
        self.check("municipality", value, &mut warnings);
        log(&warnings);
        warnings
    }
}

impl<D: MunicipalityDirectory> Advisor<EventDelivery> for MunicipalityAdvisor<D> {
    fn advise(&self, value: &EventDelivery) -> Vec<Warning> {
        let mut warnings = Vec::new();
        match &value.event {
            Event::MoveIn(e) => self.check_place("eventMoveIn/comesFrom", &e.comes_from.place, &mut warnings),
            Event::MoveOut(e) => self.check_place("eventMoveOut/goesTo", &e.goes_to.place, &mut warnings),
            _ => {}
        }
        log(&warnings);
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> MunicipalityAdvisor<InMemoryDirectory> {
        let mut directory = InMemoryDirectory::default();
        directory.insert(261, "Zürich", Canton::Zh);
        directory.insert(351, "Bern", Canton::Be);
        MunicipalityAdvisor::new(directory)
    }

    #[test]
    fn test_known_municipality_has_no_warnings() {
        let warnings = advisor().advise(&SwissMunicipality::new(261, "Zürich", Canton::Zh));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_name_comparison_folds_umlauts() {
        let warnings = advisor().advise(&SwissMunicipality::new(261, "ZÜRICH", Canton::Zh));
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_unknown_bfs_number() {
        let warnings = advisor().advise(&SwissMunicipality::new(9999, "Somewhere", Canton::Zh));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "municipality/municipalityId");
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].message.contains("Somewhere"));
    }

    #[test]
    fn test_name_and_canton_mismatch() {
        let warnings = advisor().advise(&SwissMunicipality::new(351, "Berne", Canton::Fr));
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].suggestions, vec!["Bern".to_string()]);
        assert_eq!(warnings[1].suggestions, vec!["BE".to_string()]);
    }

    #[test]
    fn test_municipality_without_bfs_number_is_skipped() {
        let municipality = SwissMunicipality {
            municipality_id: None,
            municipality_name: "Nowhere".to_string(),
            canton_abbreviation: None,
            history_municipality_id: None,
        };
        assert!(advisor().advise(&municipality).is_empty());
    }

    #[test]
    fn test_empty_directory_disables_checks() {
        let advisor = MunicipalityAdvisor::new(InMemoryDirectory::default());
        assert!(advisor.advise(&SwissMunicipality::new(9999, "Somewhere", Canton::Zh)).is_empty());
    }

    #[test]
    fn test_warning_serializes_lowercase_severity() {
        let warning = Warning {
            field: "f".to_string(),
            value: "v".to_string(),
            severity: Severity::Info,
            message: "m".to_string(),
            suggestions: Vec::new(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["severity"], "info");
        assert!(json.get("suggestions").is_none());
        assert_eq!(warning.to_string(), "[info] f: m");
    }
}
