//! In-memory ontology index

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use crate::schema::FieldKind;

use super::error::{OntologyError, OntologyResult};
use super::loader::{parse_dictionary, parse_units};
use super::normalize::{token_overlap, tokenize};
use super::types::{OntologyTerm, UnitTerm, term_from_raw};

/// Read-only index over classification terms and units.
///
/// Built once from static sources; lookups and searches never mutate it, so
/// a shared reference can serve any number of concurrent mapping requests.
#[derive(Debug, Clone)]
pub struct OntologyIndex {
    terms: BTreeMap<String, OntologyTerm>,
    units: BTreeMap<String, UnitTerm>,
    /// Inverted index: normalized token -> codes of terms carrying it
    token_index: BTreeMap<String, BTreeSet<String>>,
    /// Categorization class code -> item class codes declared as its cases
    case_items: BTreeMap<String, Vec<String>>,
}

impl OntologyIndex {
    /// Build the index from in-memory sources.
    ///
    /// `dictionary_sources` are (source id, XML content) pairs; the source
    /// id only appears in error messages. `unit_source` is the content of
    /// the unit dictionary. Sources are merged in the order given; use
    /// [`OntologyIndex::build_from_dir`] for a deterministic on-disk layout.
    pub fn build(dictionary_sources: &[(&str, &str)], unit_source: &str) -> OntologyResult<Self> {
        if dictionary_sources.is_empty() {
            return Err(OntologyError::NoSources);
        }

        let mut units = BTreeMap::new();
        for unit in parse_units("units", unit_source)? {
            units.insert(unit.code.clone(), unit);
        }

        let mut terms: BTreeMap<String, OntologyTerm> = BTreeMap::new();
        let mut case_items: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (source_id, xml) in dictionary_sources {
            let (raw_terms, raw_case_of) = parse_dictionary(source_id, xml)?;

            for raw in raw_terms {
                let mut properties = BTreeMap::new();
                for (name, kind_token) in raw.properties {
                    let kind = FieldKind::from_str(&kind_token).map_err(|message| {
                        OntologyError::UnknownPropertyKind {
                            term: raw.code.clone(),
                            property: name.clone(),
                            message,
                        }
                    })?;
                    properties.insert(name, kind);
                }

                if let Some(unit_code) = &raw.unit {
                    if !units.contains_key(unit_code) {
                        return Err(OntologyError::UnknownUnit {
                            term: raw.code,
                            unit: unit_code.clone(),
                        });
                    }
                }

                let preferred = raw.preferred_name.unwrap_or_else(|| raw.code.clone());
                let term = term_from_raw(raw.code, preferred, raw.synonyms, raw.unit, properties);
                terms.insert(term.code.clone(), term);
            }

            for item in raw_case_of {
                for class_ref in item.class_refs {
                    case_items
                        .entry(class_ref)
                        .or_default()
                        .push(item.item_id.clone());
                }
            }
        }

        for items in case_items.values_mut() {
            items.sort();
            items.dedup();
        }

        let mut token_index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for term in terms.values() {
            for form in term.name_forms() {
                for token in tokenize(form) {
                    token_index.entry(token).or_default().insert(term.code.clone());
                }
            }
        }

        tracing::info!(
            terms = terms.len(),
            units = units.len(),
            sources = dictionary_sources.len(),
            "ontology index built"
        );

        Ok(Self {
            terms,
            units,
            token_index,
            case_items,
        })
    }

    /// Build the index from a directory of classification dictionary files
    /// plus one unit dictionary file.
    ///
    /// Dictionary files are sorted by file name before parsing so the merge
    /// order (and therefore the index) is reproducible across platforms.
    pub fn build_from_dir(
        dictionary_dir: impl AsRef<Path>,
        unit_file: impl AsRef<Path>,
    ) -> OntologyResult<Self> {
        let dictionary_dir = dictionary_dir.as_ref();
        let read = |path: &Path| {
            std::fs::read_to_string(path).map_err(|source| OntologyError::SourceRead {
                path: path.to_path_buf(),
                source,
            })
        };

        let mut paths: Vec<_> = std::fs::read_dir(dictionary_dir)
            .map_err(|source| OntologyError::SourceRead {
                path: dictionary_dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "xml"))
            .collect();
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            sources.push((path.display().to_string(), read(path)?));
        }
        let borrowed: Vec<(&str, &str)> = sources
            .iter()
            .map(|(id, xml)| (id.as_str(), xml.as_str()))
            .collect();

        let unit_xml = read(unit_file.as_ref())?;
        Self::build(&borrowed, &unit_xml)
    }

    /// Exact lookup by classification code
    pub fn lookup(&self, code: &str) -> Option<&OntologyTerm> {
        self.terms.get(code)
    }

    /// Unit lookup by unit dictionary code
    pub fn unit(&self, code: &str) -> Option<&UnitTerm> {
        self.units.get(code)
    }

    /// The unit referenced by a term, if any
    pub fn unit_of(&self, term: &OntologyTerm) -> Option<&UnitTerm> {
        term.unit.as_deref().and_then(|code| self.units.get(code))
    }

    /// Item class codes declared as cases of a categorization class
    pub fn case_items(&self, code: &str) -> &[String] {
        self.case_items.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a free-form unit string denotes the given unit, either by
    /// symbol or through another dictionary unit sharing its SI base.
    pub fn unit_matches(&self, source_unit: &str, unit: &UnitTerm) -> bool {
        if unit.matches_symbol(source_unit) {
            return true;
        }
        self.units
            .values()
            .filter(|candidate| candidate.matches_symbol(source_unit))
            .any(|candidate| candidate.convertible_to(unit))
    }

    /// Search terms by free text, ranked by lexical closeness.
    ///
    /// Candidates are retrieved through the inverted token index, scored by
    /// the best token-overlap ratio across the term's name forms, and
    /// ordered by descending score then code. Calling twice with the same
    /// query yields the identical sequence.
    pub fn search_by_term(&self, text: &str) -> Vec<&OntologyTerm> {
        let query = tokenize(text);
        if query.is_empty() {
            return Vec::new();
        }

        let mut codes: BTreeSet<&str> = BTreeSet::new();
        for token in &query {
            if let Some(matching) = self.token_index.get(token) {
                codes.extend(matching.iter().map(String::as_str));
            }
        }

        let mut ranked: Vec<(f64, &OntologyTerm)> = codes
            .iter()
            .filter_map(|code| self.terms.get(*code))
            .map(|term| {
                let score = term
                    .name_forms()
                    .map(|form| token_overlap(&query, &tokenize(form)))
                    .fold(0.0_f64, f64::max);
                (score, term)
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();

        ranked.sort_by(|(sa, ta), (sb, tb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ta.code.cmp(&tb.code))
        });
        ranked.into_iter().map(|(_, term)| term).collect()
    }

    /// Number of indexed terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of indexed units
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}
