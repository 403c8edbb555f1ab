//! Ontology term and unit types

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::FieldKind;

use super::normalize::normalize;

/// A unit entry from the unit dictionary.
///
/// Units are owned by the index and referenced by code from terms; a term
/// never embeds a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTerm {
    /// Unit dictionary code
    pub code: String,
    /// Display symbol (e.g. "Nm", "kg")
    pub symbol: String,
    /// Canonical unit name (e.g. "newton metre")
    pub canonical_name: String,
    /// SI base unit symbol, when the unit is derived from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_base: Option<String>,
    /// Conversion factor to the SI base, where applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub si_factor: Option<f64>,
}

impl UnitTerm {
    /// Whether a free-form unit string refers to this unit's symbol
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }

    /// Whether two units share the same SI base (a known conversion)
    pub fn convertible_to(&self, other: &UnitTerm) -> bool {
        match (&self.si_base, &other.si_base) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A canonical classification entry from a dictionary source.
///
/// Immutable once loaded; owned exclusively by the [`super::OntologyIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyTerm {
    /// Unique classification code (e.g. "0173-101-ABX123")
    pub code: String,
    /// Preferred display name as authored in the dictionary
    pub preferred_name: String,
    /// Preferred name in canonical comparable form
    pub normalized_name: String,
    /// Normalized synonym set
    pub synonyms: BTreeSet<String>,
    /// Unit code from the unit dictionary, if the term is unit-bearing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Expected kinds of the term's declared properties
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub properties: BTreeMap<String, FieldKind>,
}

impl OntologyTerm {
    /// Whether normalized text equals the preferred name or any synonym
    pub fn matches_name(&self, normalized: &str) -> bool {
        !normalized.is_empty()
            && (self.normalized_name == normalized || self.synonyms.contains(normalized))
    }

    /// All normalized name forms of the term (preferred name + synonyms)
    pub fn name_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.normalized_name.as_str())
            .chain(self.synonyms.iter().map(String::as_str))
    }
}

/// Build an [`OntologyTerm`] from raw dictionary fields, normalizing every
/// name form.
pub(crate) fn term_from_raw(
    code: String,
    preferred_name: String,
    synonyms: Vec<String>,
    unit: Option<String>,
    properties: BTreeMap<String, FieldKind>,
) -> OntologyTerm {
    let normalized_name = normalize(&preferred_name);
    let synonyms = synonyms.iter().map(|s| normalize(s)).filter(|s| !s.is_empty()).collect();
    OntologyTerm {
        code,
        preferred_name,
        normalized_name,
        synonyms,
        unit,
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_matches_name() {
        let term = term_from_raw(
            "T1".to_string(),
            "Rated Torque".to_string(),
            vec!["Torque (rated)".to_string()],
            None,
            BTreeMap::new(),
        );

        assert!(term.matches_name("rated torque"));
        assert!(term.matches_name("torque rated"));
        assert!(!term.matches_name("torque"));
        assert!(!term.matches_name(""));
    }

    #[test]
    fn test_unit_symbol_and_conversion() {
        let nm = UnitTerm {
            code: "unit_nm".to_string(),
            symbol: "Nm".to_string(),
            canonical_name: "newton metre".to_string(),
            si_base: Some("N·m".to_string()),
            si_factor: Some(1.0),
        };
        let knm = UnitTerm {
            code: "unit_knm".to_string(),
            symbol: "kNm".to_string(),
            canonical_name: "kilonewton metre".to_string(),
            si_base: Some("N·m".to_string()),
            si_factor: Some(1000.0),
        };
        let kg = UnitTerm {
            code: "unit_kg".to_string(),
            symbol: "kg".to_string(),
            canonical_name: "kilogram".to_string(),
            si_base: Some("kg".to_string()),
            si_factor: Some(1.0),
        };

        assert!(nm.matches_symbol("nm"));
        assert!(nm.matches_symbol(" Nm "));
        assert!(!nm.matches_symbol("kg"));
        assert!(nm.convertible_to(&knm));
        assert!(!nm.convertible_to(&kg));
    }
}
