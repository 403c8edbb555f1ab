//! Types for mapping plans and match candidates

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaField;

/// Method that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Normalized source name equals the target field name
    Exact,
    /// Source matched the hinted ontology term's name or a synonym
    Synonym,
    /// Synonym match additionally confirmed by the source unit
    OntologyUnit,
    /// Token-overlap between source and target field names
    NormalizedLexical,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "exact"),
            MatchMethod::Synonym => write!(f, "synonym"),
            MatchMethod::OntologyUnit => write!(f, "ontology_unit"),
            MatchMethod::NormalizedLexical => write!(f, "normalized_lexical"),
        }
    }
}

/// One proposed assignment of a source field to a canonical schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Field name as it appears in the source data
    pub source_field: String,
    /// The canonical field this source maps onto
    pub target_field: SchemaField,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
    /// Method that produced the match
    pub method: MatchMethod,
}

impl MatchCandidate {
    /// Create a new candidate
    pub fn new(
        source_field: impl Into<String>,
        target_field: SchemaField,
        confidence: f64,
        method: MatchMethod,
    ) -> Self {
        Self {
            source_field: source_field.into(),
            target_field,
            confidence: confidence.clamp(0.0, 1.0),
            method,
        }
    }
}

/// Why a source field ended up without an accepted assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// No candidate cleared the confidence floor
    NoCandidate,
    /// Another source field claimed the same target with higher confidence
    LowerConfidence { target: String, winner: String },
    /// Tied on confidence; the lexically-first source field won
    TieBreak { target: String, winner: String },
}

/// A source field surfaced in the plan as unmatched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedField {
    /// Field name as it appears in the source data
    pub source_field: String,
    #[serde(flatten)]
    pub reason: UnmatchedReason,
}

/// Summary statistics for a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    /// Distinct source fields considered
    pub source_fields: usize,
    /// Target fields in the schema
    pub target_fields: usize,
    /// Accepted assignments
    pub mapped: usize,
    /// Distinct target fields with at least one assignment
    pub covered_targets: usize,
    /// Source fields left unmatched
    pub unmatched_sources: usize,
    /// Required target fields left uncovered
    pub unmatched_required: usize,
}

impl PlanStats {
    /// Fraction of target fields covered by at least one assignment
    pub fn coverage(&self) -> f64 {
        if self.target_fields == 0 {
            return 1.0;
        }
        self.covered_targets as f64 / self.target_fields as f64
    }
}

/// The proposed assignment of a dataset's fields to one layer schema.
///
/// Entries are ordered by source field name; no two entries share a target
/// field unless the target is a sequence (one-to-many aggregation). Losing
/// candidates are surfaced in `unmatched`, never silently dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingPlan {
    /// Layer the plan targets
    pub layer_name: String,
    /// Schema version the plan was built against
    pub version: u32,
    /// Accepted assignments, ordered by source field name
    pub entries: Vec<MatchCandidate>,
    /// Source fields without an accepted assignment, with reasons
    pub unmatched: Vec<UnmatchedField>,
    /// Required target fields no source field covers
    pub unmatched_required: BTreeSet<String>,
    /// Summary statistics
    pub stats: PlanStats,
}

impl MappingPlan {
    /// True when every required target field has an assignment
    pub fn is_complete(&self) -> bool {
        self.unmatched_required.is_empty()
    }

    /// The accepted assignment for a source field, if any
    pub fn entry_for(&self, source_field: &str) -> Option<&MatchCandidate> {
        self.entries.iter().find(|e| e.source_field == source_field)
    }

    /// All accepted assignments onto one target field, in plan order
    pub fn entries_for_target(&self, target: &str) -> Vec<&MatchCandidate> {
        self.entries
            .iter()
            .filter(|e| e.target_field.name == target)
            .collect()
    }
}
