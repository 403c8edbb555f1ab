//! Tiered semantic field matching

use serde_json::Value;

use crate::ontology::{OntologyIndex, normalize, tokenize};
use crate::schema::SchemaDefinition;

use super::config::MapperConfig;
use super::types::{MatchCandidate, MatchMethod};

/// Matches one source field against the fields of a target schema.
///
/// The matcher is a pure function of its inputs plus the read-only
/// ontology index; it holds no mutable state and can be shared freely.
///
/// Tiers, first success per target field wins:
/// 1. Exact - normalized source name equals the target field name (1.0)
/// 2. Ontology-hinted - source name or sample value matches the hinted
///    term's preferred name or a synonym (0.85, +0.05 when the source
///    unit agrees with the term's unit, capped)
/// 3. Normalized-lexical - token overlap between source and target names,
///    scaled into the lexical band; discarded below the minimum ratio
///
/// Nothing below the confidence floor is ever returned; an empty result
/// means the field should stay unmatched.
#[derive(Debug, Clone)]
pub struct SemanticMatcher<'a> {
    index: &'a OntologyIndex,
    config: MapperConfig,
}

impl<'a> SemanticMatcher<'a> {
    /// Create a matcher with default thresholds
    pub fn new(index: &'a OntologyIndex) -> Self {
        Self {
            index,
            config: MapperConfig::default(),
        }
    }

    /// Create a matcher with custom thresholds
    pub fn with_config(index: &'a OntologyIndex, config: MapperConfig) -> Self {
        Self { index, config }
    }

    /// The matcher's configuration
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Match a (field name, sample value, optional unit) triple against a
    /// schema, returning candidates ordered highest confidence first.
    pub fn match_field(
        &self,
        source_name: &str,
        sample: &Value,
        source_unit: Option<&str>,
        schema: &SchemaDefinition,
    ) -> Vec<MatchCandidate> {
        let normalized_source = normalize(source_name);
        let source_tokens = tokenize(source_name);
        let normalized_sample = sample.as_str().map(normalize);

        let mut candidates = Vec::new();

        for field in &schema.fields {
            if normalize(&field.name) == normalized_source && !normalized_source.is_empty() {
                candidates.push(MatchCandidate::new(
                    source_name,
                    field.clone(),
                    1.0,
                    MatchMethod::Exact,
                ));
                continue;
            }

            if let Some(candidate) = self.match_hint(
                source_name,
                &normalized_source,
                normalized_sample.as_deref(),
                source_unit,
                field,
            ) {
                candidates.push(candidate);
                continue;
            }

            let ratio = overlap_ratio(&source_tokens, &field.name);
            if ratio >= self.config.lexical_min_ratio {
                let confidence = self.config.lexical_confidence(ratio);
                candidates.push(MatchCandidate::new(
                    source_name,
                    field.clone(),
                    confidence,
                    MatchMethod::NormalizedLexical,
                ));
            }
        }

        candidates.retain(|c| c.confidence >= self.config.min_confidence);
        // Stable sort keeps schema declaration order for equal scores
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            source = source_name,
            candidates = candidates.len(),
            "matched source field"
        );
        candidates
    }

    fn match_hint(
        &self,
        source_name: &str,
        normalized_source: &str,
        normalized_sample: Option<&str>,
        source_unit: Option<&str>,
        field: &crate::schema::SchemaField,
    ) -> Option<MatchCandidate> {
        let code = field.ontology_hint.as_deref()?;
        let term = self.index.lookup(code)?;

        let name_hit = term.matches_name(normalized_source)
            || normalized_sample.is_some_and(|sample| term.matches_name(sample));
        if !name_hit {
            return None;
        }

        let mut confidence = self.config.hint_confidence;
        let mut method = MatchMethod::Synonym;

        if let (Some(unit_text), Some(unit)) = (source_unit, self.index.unit_of(term)) {
            if self.index.unit_matches(unit_text, unit) {
                confidence = (confidence + self.config.unit_boost).min(self.config.hint_cap);
                method = MatchMethod::OntologyUnit;
            }
        }

        Some(MatchCandidate::new(
            source_name,
            field.clone(),
            confidence,
            method,
        ))
    }
}

fn overlap_ratio(source_tokens: &std::collections::BTreeSet<String>, target_name: &str) -> f64 {
    crate::ontology::token_overlap(source_tokens, &tokenize(target_name))
}
