//! Passport layer records
//!
//! Each layer is an ordered mapping of named sections; any of them can be
//! handed to the validator as a plain JSON object via
//! [`DigitalProductPassport::layer_instance`](super::DigitalProductPassport::layer_instance).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::part::PartClass;

/// Identity layer: who made what, and under which identifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityLayer {
    /// Global identifiers (gtin, serial, ...)
    pub global_ids: Map<String, Value>,
    /// Brand, model, hardware/firmware revisions
    pub make_model: Map<String, Value>,
    /// Manufacturer, owner, operator, location
    pub ownership: Map<String, Value>,
    /// Conformity markings (CE, RoHS, UKCA, ...)
    pub conformity: Vec<String>,
}

/// Structure layer: composition, interfaces and materials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureLayer {
    /// Product hierarchy
    pub hierarchy: Map<String, Value>,
    /// Component parts
    pub parts: Vec<PartClass>,
    /// Electrical/data/fluid interfaces
    pub interfaces: Vec<Value>,
    /// Material declarations
    pub materials: Vec<Value>,
    /// Bill-of-material references
    pub bom_refs: Vec<String>,
}

/// Lifecycle layer: manufacture, use and end of life
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleLayer {
    /// Manufacturing lot, site, date, process data
    pub manufacture: Map<String, Value>,
    /// Usage counters and telemetry
    #[serde(rename = "use")]
    pub usage: Map<String, Value>,
    /// Service schedule and repair information
    pub serviceability: Map<String, Value>,
    /// Lifecycle events
    pub events: Vec<Value>,
    /// Disassembly, hazards and recovery routes
    pub end_of_life: Map<String, Value>,
}

/// Risk layer: criticality, failure modes and security posture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskLayer {
    /// Criticality levels, life-limited-part flag, MTBF
    pub criticality: Map<String, Value>,
    /// Failure mode and effects entries
    pub fmea: Vec<Value>,
    /// SBOM link, vulnerabilities, signing keys, update policy
    pub security: Map<String, Value>,
}

/// Sustainability layer: mass, energy and circularity data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityLayer {
    /// Product mass in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// Energy profile (standby, active, water use)
    pub energy: Map<String, Value>,
    /// Recycled content shares
    pub recycled_content: Map<String, Value>,
    /// Remanufacturing eligibility and grading
    pub remanufacture: Map<String, Value>,
}

/// Provenance layer: signatures and traceability links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceLayer {
    /// Attestation signatures
    pub signatures: Vec<Value>,
    /// External trace links (EPCIS events, NFC tags, ...)
    pub trace_links: Vec<String>,
}
