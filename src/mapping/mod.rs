//! Semantic field matching and mapping plan construction
//!
//! This module aligns arbitrary incoming business records with the
//! canonical schema of a passport layer:
//! - Match single fields against a schema with tiered confidence scoring
//!   (exact, ontology-hinted, normalized-lexical)
//! - Build a full [`MappingPlan`] over a dataset, resolving conflicts and
//!   surfacing unmatched fields instead of guessing
//! - Apply a plan to produce a layer instance, or refuse when required
//!   fields are uncovered
//!
//! Matching is deliberately precision-over-recall: a candidate below the
//! confidence floor is dropped and the field is left unmatched, because a
//! wrong mapping corrupts compliance-relevant data.
//!
//! # Example
//!
//! ```rust,ignore
//! use dpp_core::mapping::MappingBuilder;
//! use serde_json::json;
//!
//! let builder = MappingBuilder::new(&index);
//! let schema = registry.get("identity", None)?;
//! let records = vec![json!({"GTIN": "987654321", "Make": "Acme"})];
//!
//! let plan = builder.build_plan(&records, schema)?;
//! if plan.is_complete() {
//!     let instance = builder.apply_plan(&plan, &records, false)?;
//! }
//! ```

mod builder;
mod config;
mod error;
mod matcher;
mod types;

pub use builder::{MappingBuilder, SourceField};
pub use config::MapperConfig;
pub use error::{MappingError, MappingResult};
pub use matcher::SemanticMatcher;
pub use types::{
    MappingPlan, MatchCandidate, MatchMethod, PlanStats, UnmatchedField, UnmatchedReason,
};

/// Build a mapping plan for a dataset with the default matcher
/// configuration.
///
/// This is a convenience function for simple mapping operations.
pub fn build_plan(
    records: &[serde_json::Value],
    schema: &crate::schema::SchemaDefinition,
    index: &crate::ontology::OntologyIndex,
) -> MappingResult<MappingPlan> {
    MappingBuilder::new(index).build_plan(records, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::OntologyIndex;
    use crate::schema::{FieldKind, SchemaDefinition, SchemaField};
    use serde_json::json;

    #[test]
    fn test_build_plan_convenience() {
        let index = OntologyIndex::build(
            &[("dict.xml", "<ontology><CATEGORIZATIONCLASSType id=\"C1\"><preferredname label=\"Mass\"/></CATEGORIZATIONCLASSType></ontology>")],
            "<units/>",
        )
        .unwrap();
        let schema = SchemaDefinition::new(
            "sustainability",
            1,
            vec![SchemaField::new("mass", FieldKind::ScalarNumber).required()],
        )
        .unwrap();

        let plan = build_plan(&[json!({"mass": 5.0})], &schema, &index).unwrap();
        assert!(plan.is_complete());
        assert_eq!(plan.entries.len(), 1);
    }
}
