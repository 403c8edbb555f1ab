//! Domain-neutral part classes with ontology bindings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ontology::OntologyIndex;

/// Binding of a part to classes of one external classification ontology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyBinding {
    /// Ontology name (e.g. "ECLASS")
    pub ontology: String,
    /// Categorization class codes the part belongs to
    pub class_ids: Vec<String>,
    /// Item class codes allowed for this part under those classes
    pub case_item_ids: Vec<String>,
    /// Free-form binding metadata (dictionary release, counts, ...)
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub metadata: Map<String, Value>,
}

/// A part instance in the structure layer.
///
/// Properties are deliberately open: each part category carries its own
/// typed attributes (torque, capacity, chemistry, ...) as plain values,
/// and the layer schema decides which of them are constrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartClass {
    /// Unique part instance identifier
    pub part_id: String,
    /// Descriptive name
    pub name: String,
    /// Part category (e.g. "Sensor", "Actuator", "PowerConversion")
    pub category: String,
    /// Category-specific attributes
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub properties: Map<String, Value>,
    /// Ontology bindings, keyed by ontology name
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub bindings: BTreeMap<String, OntologyBinding>,
}

impl PartClass {
    /// Create a part with no properties or bindings
    pub fn new(
        part_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            category: category.into(),
            properties: Map::new(),
            bindings: BTreeMap::new(),
        }
    }

    /// Attach a category-specific attribute
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Bind the part to ontology classes, replacing any previous binding
    /// for the same ontology.
    pub fn bind_ontology(&mut self, binding: OntologyBinding) {
        self.bindings.insert(binding.ontology.clone(), binding);
    }

    /// Bind the part to classification classes, resolving the allowable
    /// item classes through the index.
    pub fn bind_classification(
        &mut self,
        ontology: impl Into<String>,
        class_ids: Vec<String>,
        index: &OntologyIndex,
    ) {
        let mut case_item_ids: Vec<String> = class_ids
            .iter()
            .flat_map(|class_id| index.case_items(class_id).iter().cloned())
            .collect();
        case_item_ids.sort();
        case_item_ids.dedup();

        self.bind_ontology(OntologyBinding {
            ontology: ontology.into(),
            class_ids,
            case_item_ids,
            metadata: Map::new(),
        });
    }

    /// The binding for one ontology, if present
    pub fn binding(&self, ontology: &str) -> Option<&OntologyBinding> {
        self.bindings.get(ontology)
    }

    /// Item class codes allowed for this part under one ontology
    pub fn allowed_item_types(&self, ontology: &str) -> &[String] {
        self.binding(ontology)
            .map(|b| b.case_item_ids.as_slice())
            .unwrap_or(&[])
    }
}
