//! Schema field and definition types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{SchemaError, SchemaResult};

/// Expected value kind of a schema field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Free-form text value
    ScalarText,
    /// Numeric value (integer or float)
    ScalarNumber,
    /// Boolean value
    Boolean,
    /// Nested key/value mapping
    Mapping,
    /// Ordered sequence of values
    Sequence,
    /// Text value restricted to an allowed set
    EnumWithAllowedValues { allowed: Vec<String> },
}

impl FieldKind {
    /// Check whether a JSON value satisfies this kind.
    ///
    /// Enum values must be strings; membership in the allowed set is
    /// checked separately by the validator so it can report
    /// `value-not-in-enum` rather than `wrong-kind`.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::ScalarText => value.is_string(),
            FieldKind::ScalarNumber => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Mapping => value.is_object(),
            FieldKind::Sequence => value.is_array(),
            FieldKind::EnumWithAllowedValues { .. } => value.is_string(),
        }
    }

    /// Kind name as used in configuration and reports
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::ScalarText => "scalar-text",
            FieldKind::ScalarNumber => "scalar-number",
            FieldKind::Boolean => "boolean",
            FieldKind::Mapping => "mapping",
            FieldKind::Sequence => "sequence",
            FieldKind::EnumWithAllowedValues { .. } => "enum-with-allowed-values",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scalar-text" | "text" | "string" => Ok(FieldKind::ScalarText),
            "scalar-number" | "number" => Ok(FieldKind::ScalarNumber),
            "boolean" | "bool" => Ok(FieldKind::Boolean),
            "mapping" | "object" => Ok(FieldKind::Mapping),
            "sequence" | "array" => Ok(FieldKind::Sequence),
            "enum-with-allowed-values" | "enum" => {
                Err("enum kind requires an explicit allowed-value set".to_string())
            }
            other => Err(format!("Unknown field kind: {}", other)),
        }
    }
}

/// A single field of a layer schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Canonical field name
    pub name: String,
    /// Whether the field must be present in a valid instance
    pub required: bool,
    /// Expected value kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Ontology term code used to bias semantic matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ontology_hint: Option<String>,
}

impl SchemaField {
    /// Create an optional field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
            ontology_hint: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach an ontology term code as a matching hint
    pub fn with_hint(mut self, code: impl Into<String>) -> Self {
        self.ontology_hint = Some(code.into());
        self
    }
}

/// An immutable, versioned schema for one passport layer
///
/// Field order is preserved as declared; field names are unique within a
/// definition (enforced at construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    /// Layer this schema describes (e.g. "identity")
    pub layer_name: String,
    /// Schema revision, monotonically increasing per layer
    pub version: u32,
    /// Ordered field declarations
    pub fields: Vec<SchemaField>,
}

impl SchemaDefinition {
    /// Create a definition, rejecting duplicate field names
    pub fn new(
        layer_name: impl Into<String>,
        version: u32,
        fields: Vec<SchemaField>,
    ) -> SchemaResult<Self> {
        let layer_name = layer_name.into();
        let mut seen = std::collections::BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    layer: layer_name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self {
            layer_name,
            version,
            fields,
        })
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.required)
    }
}
