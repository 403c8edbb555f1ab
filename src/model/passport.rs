//! The passport container

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::layers::{
    IdentityLayer, LifecycleLayer, ProvenanceLayer, RiskLayer, StructureLayer, SustainabilityLayer,
};

/// Layer names in passport order
pub const LAYER_NAMES: [&str; 6] = [
    "identity",
    "structure",
    "lifecycle",
    "risk",
    "sustainability",
    "provenance",
];

/// A complete Digital Product Passport.
///
/// The passport itself is declarative; constraint checking happens per
/// layer via [`validate`](crate::validation::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalProductPassport {
    /// Passport identifier
    pub id: Uuid,
    /// Issue timestamp
    pub issued_at: DateTime<Utc>,
    pub identity: IdentityLayer,
    pub structure: StructureLayer,
    pub lifecycle: LifecycleLayer,
    pub risk: RiskLayer,
    pub sustainability: SustainabilityLayer,
    pub provenance: ProvenanceLayer,
}

impl DigitalProductPassport {
    /// Assemble a passport from its layers, stamping a fresh id and issue
    /// time.
    pub fn new(
        identity: IdentityLayer,
        structure: StructureLayer,
        lifecycle: LifecycleLayer,
        risk: RiskLayer,
        sustainability: SustainabilityLayer,
        provenance: ProvenanceLayer,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
            identity,
            structure,
            lifecycle,
            risk,
            sustainability,
            provenance,
        }
    }

    /// One layer as a plain JSON object, suitable for the validator.
    ///
    /// Returns `None` for an unknown layer name.
    pub fn layer_instance(&self, layer: &str) -> Option<Value> {
        let value = match layer {
            "identity" => serde_json::to_value(&self.identity),
            "structure" => serde_json::to_value(&self.structure),
            "lifecycle" => serde_json::to_value(&self.lifecycle),
            "risk" => serde_json::to_value(&self.risk),
            "sustainability" => serde_json::to_value(&self.sustainability),
            "provenance" => serde_json::to_value(&self.provenance),
            _ => return None,
        };
        value.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passport() -> DigitalProductPassport {
        let mut identity = IdentityLayer::default();
        identity
            .global_ids
            .insert("gtin".to_string(), json!("987654321"));
        identity.conformity.push("CE".to_string());

        DigitalProductPassport::new(
            identity,
            StructureLayer::default(),
            LifecycleLayer::default(),
            RiskLayer::default(),
            SustainabilityLayer::default(),
            ProvenanceLayer::default(),
        )
    }

    #[test]
    fn test_layer_instance_views() {
        let passport = passport();

        for layer in LAYER_NAMES {
            let instance = passport.layer_instance(layer).unwrap();
            assert!(instance.is_object(), "layer {layer} should be an object");
        }
        assert!(passport.layer_instance("telemetry").is_none());

        let identity = passport.layer_instance("identity").unwrap();
        assert_eq!(identity["global_ids"]["gtin"], json!("987654321"));
        assert_eq!(identity["conformity"], json!(["CE"]));
    }

    #[test]
    fn test_passports_get_distinct_ids() {
        assert_ne!(passport().id, passport().id);
    }

    #[test]
    fn test_passport_round_trips() {
        let passport = passport();
        let text = serde_json::to_string(&passport).unwrap();
        let back: DigitalProductPassport = serde_json::from_str(&text).unwrap();
        assert_eq!(passport, back);
    }
}
