//! Digital Product Passport core - schema mapping and validation
//!
//! Provides the building blocks for mapping heterogeneous manufacturer data
//! onto a layered Digital Product Passport model:
//! - Ontology loading/indexing (classification + unit dictionaries)
//! - Versioned layer schema registry
//! - Semantic field matching with confidence scoring
//! - Mapping plan construction and application
//! - Structural validation of layer instances

pub mod export;
pub mod mapping;
pub mod model;
pub mod ontology;
pub mod schema;
pub mod validation;

// Re-export commonly used types
pub use ontology::{OntologyError, OntologyIndex, OntologyResult, OntologyTerm, UnitTerm};
pub use schema::{FieldKind, SchemaDefinition, SchemaError, SchemaField, SchemaRegistry};

pub use mapping::{
    MapperConfig, MappingBuilder, MappingError, MappingPlan, MappingResult, MatchCandidate,
    MatchMethod, SemanticMatcher, SourceField, UnmatchedReason,
};
pub use validation::{ValidationReport, Violation, ViolationKind, validate};

pub use export::{ExportError, to_json, to_json_pretty, to_yaml};
pub use model::{
    DigitalProductPassport, IdentityLayer, LifecycleLayer, OntologyBinding, PartClass,
    ProvenanceLayer, RiskLayer, StructureLayer, SustainabilityLayer,
};
