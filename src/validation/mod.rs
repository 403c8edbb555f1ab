//! Structural validation of layer instances
//!
//! Applies a [`SchemaDefinition`](crate::schema::SchemaDefinition) to a
//! constructed layer instance and reports every constraint violation in a
//! single pass. The report is a first-class result, never an error: callers
//! must inspect it before trusting an instance. A clean report means the
//! instance is structurally valid; it does not certify that the values are
//! domain-correct.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{FieldKind, SchemaDefinition};

/// Kind of constraint violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "violation", rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A required field is absent from the instance
    MissingRequired,
    /// The value's runtime kind disagrees with the declared kind
    WrongKind { expected: String, actual: String },
    /// An enum field holds a value outside its allowed set
    ValueNotInEnum { value: String },
}

/// One violation, tied to the offending field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Name of the offending schema field
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// Validation outcome for one layer instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Layer the instance was validated against
    pub layer_name: String,
    /// Every violation found, in schema field order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no violations were found
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one kind discriminant
    pub fn missing_required(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| matches!(v.kind, ViolationKind::MissingRequired))
    }
}

/// Runtime kind name of a JSON value, for violation reports
fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "scalar-number",
        Value::String(_) => "scalar-text",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Validate a layer instance against a schema.
///
/// The instance is any JSON object (an ordered mapping from field name to
/// value); a non-object instance exposes no fields, so every required
/// field is reported missing. Validation is total: it never stops at the
/// first violation.
pub fn validate(instance: &Value, schema: &SchemaDefinition) -> ValidationReport {
    let mut violations = Vec::new();
    let fields = instance.as_object();

    for field in &schema.fields {
        let value = fields.and_then(|f| f.get(&field.name));
        match value {
            None => {
                if field.required {
                    violations.push(Violation {
                        field: field.name.clone(),
                        kind: ViolationKind::MissingRequired,
                    });
                }
            }
            Some(value) => {
                if !field.kind.accepts(value) {
                    violations.push(Violation {
                        field: field.name.clone(),
                        kind: ViolationKind::WrongKind {
                            expected: field.kind.name().to_string(),
                            actual: value_kind_name(value).to_string(),
                        },
                    });
                } else if let FieldKind::EnumWithAllowedValues { allowed } = &field.kind {
                    let text = value.as_str().unwrap_or_default();
                    if !allowed.iter().any(|a| a == text) {
                        violations.push(Violation {
                            field: field.name.clone(),
                            kind: ViolationKind::ValueNotInEnum {
                                value: text.to_string(),
                            },
                        });
                    }
                }
            }
        }
    }

    ValidationReport {
        layer_name: schema.layer_name.clone(),
        violations,
    }
}
