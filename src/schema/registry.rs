//! Append-only registry of layer schemas

use std::collections::BTreeMap;

use super::error::{SchemaError, SchemaResult};
use super::types::{SchemaDefinition, SchemaField};

/// Holds one schema definition per (layer, version) pair.
///
/// The registry is built during initialization and handed by reference to
/// the components that need it; definitions are never mutated or replaced
/// once registered.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    layers: BTreeMap<String, BTreeMap<u32, SchemaDefinition>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Fails if a definition for the same (layer, version) pair is already
    /// present; re-registration is a programmer error, not a merge.
    pub fn register(&mut self, definition: SchemaDefinition) -> SchemaResult<()> {
        let versions = self.layers.entry(definition.layer_name.clone()).or_default();
        if versions.contains_key(&definition.version) {
            return Err(SchemaError::DuplicateSchema {
                layer: definition.layer_name,
                version: definition.version,
            });
        }
        versions.insert(definition.version, definition);
        Ok(())
    }

    /// Resolve a definition.
    ///
    /// With `version: None` the highest registered version for the layer is
    /// returned.
    pub fn get(&self, layer: &str, version: Option<u32>) -> SchemaResult<&SchemaDefinition> {
        let not_found = || SchemaError::SchemaNotFound {
            layer: layer.to_string(),
            version,
        };
        let versions = self.layers.get(layer).ok_or_else(not_found)?;
        match version {
            Some(v) => versions.get(&v).ok_or_else(not_found),
            None => versions.last_key_value().map(|(_, d)| d).ok_or_else(not_found),
        }
    }

    /// Ordered fields of a layer schema
    pub fn list_fields(&self, layer: &str, version: Option<u32>) -> SchemaResult<&[SchemaField]> {
        Ok(&self.get(layer, version)?.fields)
    }

    /// Layer names with at least one registered version
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Total number of registered definitions
    pub fn len(&self) -> usize {
        self.layers.values().map(BTreeMap::len).sum()
    }

    /// True if no definitions are registered
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn identity_v(version: u32) -> SchemaDefinition {
        SchemaDefinition::new(
            "identity",
            version,
            vec![SchemaField::new("global_ids", FieldKind::Mapping).required()],
        )
        .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(identity_v(1)).unwrap();

        let def = registry.get("identity", Some(1)).unwrap();
        assert_eq!(def.layer_name, "identity");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = SchemaRegistry::new();
        registry.register(identity_v(1)).unwrap();

        assert!(matches!(
            registry.register(identity_v(1)),
            Err(SchemaError::DuplicateSchema { version: 1, .. })
        ));
    }

    #[test]
    fn test_get_without_version_returns_highest() {
        let mut registry = SchemaRegistry::new();
        registry.register(identity_v(1)).unwrap();
        registry.register(identity_v(3)).unwrap();
        registry.register(identity_v(2)).unwrap();

        assert_eq!(registry.get("identity", None).unwrap().version, 3);
    }

    #[test]
    fn test_missing_layer_and_version() {
        let mut registry = SchemaRegistry::new();
        registry.register(identity_v(1)).unwrap();

        assert!(matches!(
            registry.get("structure", None),
            Err(SchemaError::SchemaNotFound { .. })
        ));
        assert!(matches!(
            registry.get("identity", Some(9)),
            Err(SchemaError::SchemaNotFound { .. })
        ));
    }

    #[test]
    fn test_list_fields_preserves_order() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                SchemaDefinition::new(
                    "structure",
                    1,
                    vec![
                        SchemaField::new("hierarchy", FieldKind::Mapping),
                        SchemaField::new("parts", FieldKind::Sequence),
                        SchemaField::new("bom_refs", FieldKind::Sequence),
                    ],
                )
                .unwrap(),
            )
            .unwrap();

        let fields = registry.list_fields("structure", None).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["hierarchy", "parts", "bom_refs"]);
    }
}
