//! Dictionary source parsing
//!
//! Parses classification-dictionary and unit-dictionary XML into raw
//! entries. Element names follow the classification dictionary layout:
//! `CATEGORIZATIONCLASSType` entries carry the terms, `ITEMCLASSCASEOFType`
//! entries declare which categorization classes an item class is a case of,
//! and `UNITType` entries make up the unit dictionary. Namespaces are
//! ignored; only local element names are matched.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{OntologyError, OntologyResult};
use super::types::UnitTerm;

/// A term entry before normalization and unit resolution
#[derive(Debug, Default)]
pub(crate) struct RawTerm {
    pub code: String,
    pub preferred_name: Option<String>,
    pub synonyms: Vec<String>,
    pub unit: Option<String>,
    /// (property name, declared kind token)
    pub properties: Vec<(String, String)>,
}

/// An item-class entry with its case-of class references
#[derive(Debug, Default)]
pub(crate) struct RawCaseOf {
    pub item_id: String,
    pub class_refs: Vec<String>,
}

#[derive(Debug, Default)]
struct RawUnit {
    id: String,
    shortname: Option<String>,
    preferred_name: Option<String>,
    si_base: Option<String>,
    si_factor: Option<f64>,
}

impl RawUnit {
    fn finish(self) -> UnitTerm {
        let symbol = self.shortname.unwrap_or_else(|| self.id.clone());
        let canonical_name = self.preferred_name.unwrap_or_else(|| symbol.clone());
        UnitTerm {
            code: self.id,
            symbol,
            canonical_name,
            si_base: self.si_base,
            si_factor: self.si_factor,
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if String::from_utf8_lossy(attr.key.as_ref()) == name {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Parse one classification dictionary source.
///
/// Entries without an `id` attribute are skipped with a warning, matching
/// how incomplete dictionary exports are handled upstream. Item classes are
/// only recorded when they declare at least one case-of reference. A
/// non-wellformed document fails the parse.
pub(crate) fn parse_dictionary(
    source_id: &str,
    xml: &str,
) -> OntologyResult<(Vec<RawTerm>, Vec<RawCaseOf>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut terms: Vec<RawTerm> = Vec::new();
    let mut case_of: Vec<RawCaseOf> = Vec::new();
    let mut current_term: Option<RawTerm> = None;
    let mut current_item: Option<RawCaseOf> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                open_dictionary_element(e, false, &mut terms, &mut current_term, &mut current_item);
            }
            Ok(Event::Empty(ref e)) => {
                open_dictionary_element(e, true, &mut terms, &mut current_term, &mut current_item);
            }
            Ok(Event::End(ref e)) => {
                match String::from_utf8_lossy(e.local_name().as_ref()).as_ref() {
                    "CATEGORIZATIONCLASSType" => {
                        if let Some(term) = current_term.take() {
                            terms.push(term);
                        }
                    }
                    "ITEMCLASSCASEOFType" => {
                        if let Some(item) = current_item.take() {
                            if !item.class_refs.is_empty() {
                                case_of.push(item);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OntologyError::Malformed {
                    source_id: source_id.to_string(),
                    position: reader.error_position(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
    }

    Ok((terms, case_of))
}

fn open_dictionary_element(
    e: &BytesStart<'_>,
    self_closing: bool,
    terms: &mut Vec<RawTerm>,
    current_term: &mut Option<RawTerm>,
    current_item: &mut Option<RawCaseOf>,
) {
    match local_name(e).as_str() {
        "CATEGORIZATIONCLASSType" => match attr_value(e, "id") {
            Some(id) => {
                let term = RawTerm {
                    code: id,
                    ..Default::default()
                };
                if self_closing {
                    terms.push(term);
                } else {
                    *current_term = Some(term);
                }
            }
            None => tracing::warn!("skipping classification entry without an id attribute"),
        },
        "ITEMCLASSCASEOFType" => {
            if self_closing {
                return;
            }
            match attr_value(e, "id") {
                Some(id) => {
                    *current_item = Some(RawCaseOf {
                        item_id: id,
                        class_refs: Vec::new(),
                    });
                }
                None => tracing::warn!("skipping item class entry without an id attribute"),
            }
        }
        "preferredname" => {
            if let (Some(term), Some(label)) = (current_term.as_mut(), attr_value(e, "label")) {
                term.preferred_name = Some(label);
            }
        }
        "synonym" => {
            if let (Some(term), Some(label)) = (current_term.as_mut(), attr_value(e, "label")) {
                term.synonyms.push(label);
            }
        }
        "unitref" => {
            if let (Some(term), Some(unit)) = (current_term.as_mut(), attr_value(e, "ref")) {
                term.unit = Some(unit);
            }
        }
        "property" => {
            if let Some(term) = current_term.as_mut() {
                match (attr_value(e, "name"), attr_value(e, "kind")) {
                    (Some(name), Some(kind)) => term.properties.push((name, kind)),
                    _ => tracing::warn!(
                        term = %term.code,
                        "skipping property without name/kind attributes"
                    ),
                }
            }
        }
        "classref" => {
            if let (Some(item), Some(class_ref)) = (current_item.as_mut(), attr_value(e, "ref")) {
                item.class_refs.push(class_ref);
            }
        }
        _ => {}
    }
}

/// Parse the unit dictionary source.
///
/// Every `UNITType` entry must carry an `id`; the symbol falls back to the
/// id and the canonical name to the symbol when the optional children are
/// absent.
pub(crate) fn parse_units(source_id: &str, xml: &str) -> OntologyResult<Vec<UnitTerm>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut units: Vec<UnitTerm> = Vec::new();
    let mut current: Option<RawUnit> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match local_name(e).as_str() {
                    "UNITType" => {
                        if let Some(unit) = current.take() {
                            units.push(unit.finish());
                        }
                        let id = attr_value(e, "id").ok_or_else(|| {
                            OntologyError::MissingAttribute {
                                source_id: source_id.to_string(),
                                element: "UNITType",
                                attribute: "id",
                            }
                        })?;
                        current = Some(RawUnit {
                            id,
                            ..Default::default()
                        });
                    }
                    "shortname" => {
                        if let (Some(unit), Some(label)) = (current.as_mut(), attr_value(e, "label"))
                        {
                            unit.shortname = Some(label);
                        }
                    }
                    "preferredname" => {
                        if let (Some(unit), Some(label)) = (current.as_mut(), attr_value(e, "label"))
                        {
                            unit.preferred_name = Some(label);
                        }
                    }
                    "si" => {
                        if let Some(unit) = current.as_mut() {
                            unit.si_base = attr_value(e, "base");
                            if let Some(factor) = attr_value(e, "factor") {
                                let parsed = factor.parse::<f64>().map_err(|err| {
                                    OntologyError::Malformed {
                                        source_id: source_id.to_string(),
                                        position: reader.buffer_position(),
                                        message: format!(
                                            "unit '{}': bad si factor '{}': {}",
                                            unit.id, factor, err
                                        ),
                                    }
                                })?;
                                unit.si_factor = Some(parsed);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if String::from_utf8_lossy(e.local_name().as_ref()).as_ref() == "UNITType" {
                    if let Some(unit) = current.take() {
                        units.push(unit.finish());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OntologyError::Malformed {
                    source_id: source_id.to_string(),
                    position: reader.error_position(),
                    message: e.to_string(),
                });
            }
            _ => {}
        }
    }

    // A self-closing UNITType never sees its End event
    if let Some(unit) = current.take() {
        units.push(unit.finish());
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICTIONARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ontology xmlns="http://example.org/classification">
  <CATEGORIZATIONCLASSType id="0173-101-ABX123">
    <preferredname label="Rated torque"/>
    <synonym label="Torque rating"/>
    <synonym label="Nominal torque"/>
    <unitref ref="unit_nm"/>
    <property name="torque" kind="scalar-number"/>
  </CATEGORIZATIONCLASSType>
  <CATEGORIZATIONCLASSType id="0173-101-ABC456">
    <preferredname label="Sensor accuracy"/>
  </CATEGORIZATIONCLASSType>
  <ITEMCLASSCASEOFType id="0173-1-ITEM-01">
    <iscaseof><classref ref="0173-101-ABX123"/></iscaseof>
  </ITEMCLASSCASEOFType>
</ontology>"#;

    const UNITS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<units>
  <UNITType id="unit_nm">
    <shortname label="Nm"/>
    <preferredname label="newton metre"/>
    <si base="N·m" factor="1.0"/>
  </UNITType>
  <UNITType id="unit_knm">
    <shortname label="kNm"/>
    <preferredname label="kilonewton metre"/>
    <si base="N·m" factor="1000.0"/>
  </UNITType>
</units>"#;

    #[test]
    fn test_parse_dictionary() {
        let (terms, case_of) = parse_dictionary("dict.xml", DICTIONARY).unwrap();

        assert_eq!(terms.len(), 2);
        let torque = &terms[0];
        assert_eq!(torque.code, "0173-101-ABX123");
        assert_eq!(torque.preferred_name.as_deref(), Some("Rated torque"));
        assert_eq!(torque.synonyms.len(), 2);
        assert_eq!(torque.unit.as_deref(), Some("unit_nm"));
        assert_eq!(torque.properties.len(), 1);

        assert_eq!(case_of.len(), 1);
        assert_eq!(case_of[0].item_id, "0173-1-ITEM-01");
        assert_eq!(case_of[0].class_refs, ["0173-101-ABX123"]);
    }

    #[test]
    fn test_parse_dictionary_skips_entries_without_id() {
        let xml = r#"<ontology>
  <CATEGORIZATIONCLASSType><preferredname label="Orphan"/></CATEGORIZATIONCLASSType>
  <CATEGORIZATIONCLASSType id="C1"><preferredname label="Kept"/></CATEGORIZATIONCLASSType>
</ontology>"#;
        let (terms, _) = parse_dictionary("dict.xml", xml).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].code, "C1");
    }

    #[test]
    fn test_parse_dictionary_rejects_malformed_xml() {
        let result = parse_dictionary("broken.xml", "<ontology><CATEGORIZATION");
        assert!(matches!(result, Err(OntologyError::Malformed { .. })));
    }

    #[test]
    fn test_parse_units() {
        let units = parse_units("units.xml", UNITS).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].code, "unit_nm");
        assert_eq!(units[0].symbol, "Nm");
        assert_eq!(units[0].canonical_name, "newton metre");
        assert_eq!(units[0].si_base.as_deref(), Some("N·m"));
        assert_eq!(units[0].si_factor, Some(1.0));
    }

    #[test]
    fn test_parse_units_requires_id() {
        let xml = r#"<units><UNITType><shortname label="Nm"/></UNITType></units>"#;
        assert!(matches!(
            parse_units("units.xml", xml),
            Err(OntologyError::MissingAttribute {
                attribute: "id",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_units_rejects_bad_factor() {
        let xml = r#"<units><UNITType id="u"><si base="m" factor="fast"/></UNITType></units>"#;
        assert!(matches!(
            parse_units("units.xml", xml),
            Err(OntologyError::Malformed { .. })
        ));
    }
}
