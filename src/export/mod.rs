//! Export helpers
//!
//! Thin serialization surface over passports, layers, plans and reports.
//! The core hands out plain nested mappings; turning them into a document
//! format is all that happens here. Persistence and transport stay with
//! the caller.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during export
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed
    #[error("YAML export failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialize any passport value to compact JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize any passport value to pretty-printed JSON
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize any passport value to YAML
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_yaml::to_string(value)?)
}
