//! Mapping plan construction and application

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::ontology::OntologyIndex;
use crate::schema::{FieldKind, SchemaDefinition};

use super::config::MapperConfig;
use super::error::{MappingError, MappingResult};
use super::matcher::SemanticMatcher;
use super::types::{
    MappingPlan, MatchCandidate, PlanStats, UnmatchedField, UnmatchedReason,
};

/// One source field prepared for matching, optionally with unit metadata.
#[derive(Debug, Clone)]
pub struct SourceField {
    /// Field name as it appears in the source data
    pub name: String,
    /// A sample value for the field
    pub sample: Value,
    /// Unit string supplied by the source system, if known
    pub unit: Option<String>,
}

impl SourceField {
    /// Create a source field without unit metadata
    pub fn new(name: impl Into<String>, sample: Value) -> Self {
        Self {
            name: name.into(),
            sample,
            unit: None,
        }
    }

    /// Attach a unit string
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Orchestrates the matcher across a whole dataset against one layer
/// schema, producing a [`MappingPlan`] and applying it to build layer
/// instances.
#[derive(Debug, Clone)]
pub struct MappingBuilder<'a> {
    matcher: SemanticMatcher<'a>,
}

impl<'a> MappingBuilder<'a> {
    /// Create a builder with default matcher thresholds
    pub fn new(index: &'a OntologyIndex) -> Self {
        Self {
            matcher: SemanticMatcher::new(index),
        }
    }

    /// Create a builder with custom matcher thresholds
    pub fn with_config(index: &'a OntologyIndex, config: MapperConfig) -> Self {
        Self {
            matcher: SemanticMatcher::with_config(index, config),
        }
    }

    /// Build a plan from raw JSON records.
    ///
    /// Every record must be a JSON object; the first value seen for a
    /// field name serves as its sample. Fields are processed in sorted
    /// name order so the plan never depends on record iteration order.
    pub fn build_plan(
        &self,
        records: &[Value],
        schema: &SchemaDefinition,
    ) -> MappingResult<MappingPlan> {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            let object = record
                .as_object()
                .ok_or(MappingError::RecordNotAnObject { index })?;
            for (name, value) in object {
                fields
                    .entry(name.clone())
                    .or_insert_with(|| value.clone());
            }
        }

        let source_fields: Vec<SourceField> = fields
            .into_iter()
            .map(|(name, sample)| SourceField::new(name, sample))
            .collect();
        self.build_plan_from_fields(&source_fields, schema)
    }

    /// Build a plan from prepared source fields.
    ///
    /// Use this entry point when the source system carries unit metadata
    /// alongside its field names.
    pub fn build_plan_from_fields(
        &self,
        source_fields: &[SourceField],
        schema: &SchemaDefinition,
    ) -> MappingResult<MappingPlan> {
        let mut ordered: Vec<&SourceField> = source_fields.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        ordered.dedup_by(|a, b| a.name == b.name);

        // Winner per non-sequence target; sequence targets aggregate freely
        let mut assigned: BTreeMap<String, MatchCandidate> = BTreeMap::new();
        let mut aggregated: Vec<MatchCandidate> = Vec::new();
        let mut unmatched: Vec<UnmatchedField> = Vec::new();

        for source in &ordered {
            let top = self
                .matcher
                .match_field(&source.name, &source.sample, source.unit.as_deref(), schema)
                .into_iter()
                .next();

            let Some(candidate) = top else {
                unmatched.push(UnmatchedField {
                    source_field: source.name.clone(),
                    reason: UnmatchedReason::NoCandidate,
                });
                continue;
            };

            if matches!(candidate.target_field.kind, FieldKind::Sequence) {
                aggregated.push(candidate);
                continue;
            }

            let target = candidate.target_field.name.clone();
            let incumbent = assigned
                .get(&target)
                .map(|winner| (winner.confidence, winner.source_field.clone()));
            match incumbent {
                None => {
                    assigned.insert(target, candidate);
                }
                Some((incumbent_confidence, _)) if candidate.confidence > incumbent_confidence => {
                    let winner = candidate.source_field.clone();
                    if let Some(loser) = assigned.insert(target.clone(), candidate) {
                        tracing::warn!(
                            source = %loser.source_field,
                            target = %target,
                            "source field displaced by higher-confidence match"
                        );
                        unmatched.push(UnmatchedField {
                            source_field: loser.source_field,
                            reason: UnmatchedReason::LowerConfidence { target, winner },
                        });
                    }
                }
                Some((incumbent_confidence, incumbent_source)) => {
                    // Equal or lower confidence loses; sources arrive in
                    // lexical order, so the incumbent keeps an exact tie
                    let reason = if candidate.confidence == incumbent_confidence {
                        UnmatchedReason::TieBreak {
                            target,
                            winner: incumbent_source,
                        }
                    } else {
                        UnmatchedReason::LowerConfidence {
                            target,
                            winner: incumbent_source,
                        }
                    };
                    tracing::warn!(
                        source = %candidate.source_field,
                        "source field lost mapping conflict"
                    );
                    unmatched.push(UnmatchedField {
                        source_field: candidate.source_field,
                        reason,
                    });
                }
            }
        }

        let mut entries: Vec<MatchCandidate> =
            assigned.into_values().chain(aggregated).collect();
        entries.sort_by(|a, b| a.source_field.cmp(&b.source_field));

        let covered: BTreeSet<&str> = entries
            .iter()
            .map(|e| e.target_field.name.as_str())
            .collect();
        let unmatched_required: BTreeSet<String> = schema
            .required_fields()
            .filter(|f| !covered.contains(f.name.as_str()))
            .map(|f| f.name.clone())
            .collect();

        let stats = PlanStats {
            source_fields: ordered.len(),
            target_fields: schema.fields.len(),
            mapped: entries.len(),
            covered_targets: covered.len(),
            unmatched_sources: unmatched.len(),
            unmatched_required: unmatched_required.len(),
        };

        Ok(MappingPlan {
            layer_name: schema.layer_name.clone(),
            version: schema.version,
            entries,
            unmatched,
            unmatched_required,
            stats,
        })
    }

    /// Apply a plan to source records, producing a layer instance.
    ///
    /// Fails with [`MappingError::IncompletePlan`] when required target
    /// fields are uncovered, unless `partial` is set. Sequence targets
    /// with several assigned sources aggregate their values into one
    /// array, in plan entry order.
    pub fn apply_plan(
        &self,
        plan: &MappingPlan,
        records: &[Value],
        partial: bool,
    ) -> MappingResult<Value> {
        if !partial && !plan.is_complete() {
            return Err(MappingError::IncompletePlan {
                missing: plan.unmatched_required.iter().cloned().collect(),
            });
        }

        let mut instance: Map<String, Value> = Map::new();

        for entry in &plan.entries {
            let Some(value) = first_value(records, &entry.source_field) else {
                continue;
            };
            let target = &entry.target_field.name;

            if matches!(entry.target_field.kind, FieldKind::Sequence) {
                let slot = instance
                    .entry(target.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = slot {
                    match value {
                        Value::Array(more) => items.extend(more),
                        other => items.push(other),
                    }
                }
            } else {
                instance.insert(target.clone(), value);
            }
        }

        Ok(Value::Object(instance))
    }
}

fn first_value(records: &[Value], field: &str) -> Option<Value> {
    records
        .iter()
        .filter_map(Value::as_object)
        .find_map(|object| object.get(field).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaField;
    use serde_json::json;

    const DICTIONARY: &str = r#"<ontology>
  <CATEGORIZATIONCLASSType id="0173-101-ABX123">
    <preferredname label="Rated torque"/>
    <synonym label="Nominal torque"/>
    <unitref ref="unit_nm"/>
  </CATEGORIZATIONCLASSType>
</ontology>"#;

    const UNITS: &str = r#"<units>
  <UNITType id="unit_nm">
    <shortname label="Nm"/>
    <si base="N·m" factor="1.0"/>
  </UNITType>
</units>"#;

    fn index() -> OntologyIndex {
        OntologyIndex::build(&[("dict.xml", DICTIONARY)], UNITS).unwrap()
    }

    fn identity_schema() -> SchemaDefinition {
        SchemaDefinition::new(
            "identity",
            1,
            vec![
                SchemaField::new("global_ids", FieldKind::Mapping).required(),
                SchemaField::new("make_model", FieldKind::Mapping).required(),
                SchemaField::new("conformity", FieldKind::Sequence).required(),
                SchemaField::new("ownership", FieldKind::Mapping),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_plan_marks_missing_required() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let records = vec![json!({
            "global_ids": {"gtin": "987654321"},
            "make_model": {"brand": "Acme"}
        })];

        let plan = builder.build_plan(&records, &identity_schema()).unwrap();

        assert_eq!(plan.entries.len(), 2);
        assert_eq!(
            plan.unmatched_required.iter().collect::<Vec<_>>(),
            ["conformity"]
        );
        assert!(!plan.is_complete());
    }

    #[test]
    fn test_apply_incomplete_plan_fails_without_partial() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let records = vec![json!({
            "global_ids": {"gtin": "987654321"},
            "make_model": {"brand": "Acme"}
        })];
        let plan = builder.build_plan(&records, &identity_schema()).unwrap();

        assert!(matches!(
            builder.apply_plan(&plan, &records, false),
            Err(MappingError::IncompletePlan { .. })
        ));

        let instance = builder.apply_plan(&plan, &records, true).unwrap();
        assert!(instance.get("global_ids").is_some());
        assert!(instance.get("conformity").is_none());
    }

    #[test]
    fn test_build_plan_rejects_non_object_record() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        assert!(matches!(
            builder.build_plan(&[json!([1, 2])], &identity_schema()),
            Err(MappingError::RecordNotAnObject { index: 0 })
        ));
    }

    #[test]
    fn test_conflict_keeps_higher_confidence() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let schema = SchemaDefinition::new(
            "structure",
            1,
            vec![SchemaField::new("torque", FieldKind::ScalarNumber).with_hint("0173-101-ABX123")],
        )
        .unwrap();

        // "torque" matches exactly (1.0); "Nominal torque" only via the
        // ontology hint (0.85)
        let records = vec![json!({"torque": 2.1, "Nominal torque": 2.0})];
        let plan = builder.build_plan(&records, &schema).unwrap();

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].source_field, "torque");
        assert_eq!(plan.unmatched.len(), 1);
        assert_eq!(plan.unmatched[0].source_field, "Nominal torque");
        assert!(matches!(
            plan.unmatched[0].reason,
            UnmatchedReason::LowerConfidence { .. }
        ));
    }

    #[test]
    fn test_conflict_tie_breaks_lexically() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let schema = SchemaDefinition::new(
            "structure",
            1,
            vec![SchemaField::new("torque", FieldKind::ScalarNumber)],
        )
        .unwrap();

        // Both sources reach "torque" lexically with the same 1/2 overlap
        let records = vec![json!({"torque_nm": 2.1, "torque_arm": 0.3})];
        let plan = builder.build_plan(&records, &schema).unwrap();

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].source_field, "torque_arm");
        assert_eq!(plan.unmatched.len(), 1);
        assert_eq!(plan.unmatched[0].source_field, "torque_nm");
        assert!(matches!(
            plan.unmatched[0].reason,
            UnmatchedReason::TieBreak { .. }
        ));
    }

    #[test]
    fn test_sequence_target_aggregates() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let schema = SchemaDefinition::new(
            "identity",
            1,
            vec![SchemaField::new("conformity", FieldKind::Sequence).required()],
        )
        .unwrap();

        let records = vec![json!({
            "conformity": ["CE", "RoHS"],
            "conformity_marks": "UKCA"
        })];
        let plan = builder.build_plan(&records, &schema).unwrap();
        assert_eq!(plan.entries.len(), 2);

        let instance = builder.apply_plan(&plan, &records, false).unwrap();
        assert_eq!(instance["conformity"], json!(["CE", "RoHS", "UKCA"]));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let records = vec![json!({
            "global_ids": {"gtin": "987654321"},
            "make_model": {"brand": "Acme"},
            "conformity": ["CE"],
            "owner_detail": {"operator": "X"}
        })];

        let first = builder.build_plan(&records, &identity_schema()).unwrap();
        let second = builder.build_plan(&records, &identity_schema()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats() {
        let index = index();
        let builder = MappingBuilder::new(&index);
        let records = vec![json!({
            "global_ids": {"gtin": "987654321"},
            "serial_code_internal": "X-1"
        })];
        let plan = builder.build_plan(&records, &identity_schema()).unwrap();

        assert_eq!(plan.stats.source_fields, 2);
        assert_eq!(plan.stats.target_fields, 4);
        assert_eq!(plan.stats.mapped, 1);
        assert_eq!(plan.stats.unmatched_sources, 1);
        assert_eq!(plan.stats.unmatched_required, 2);
        assert!((plan.stats.coverage() - 0.25).abs() < 1e-9);
    }
}
