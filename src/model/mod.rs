//! Digital Product Passport data model
//!
//! Declarative record types for the passport and its layers, plus the
//! reusable part classes that populate the structure layer. These are thin
//! containers: all constraint checking lives in
//! [`validation`](crate::validation) and all field alignment in
//! [`mapping`](crate::mapping).

mod layers;
mod part;
mod passport;

pub use layers::{
    IdentityLayer, LifecycleLayer, ProvenanceLayer, RiskLayer, StructureLayer, SustainabilityLayer,
};
pub use part::{OntologyBinding, PartClass};
pub use passport::{DigitalProductPassport, LAYER_NAMES};
