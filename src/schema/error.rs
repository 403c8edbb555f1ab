//! Error types for schema registration and lookup

use thiserror::Error;

/// Errors that can occur when defining or resolving layer schemas
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A definition for this (layer, version) pair is already registered
    #[error("schema '{layer}' version {version} is already registered")]
    DuplicateSchema { layer: String, version: u32 },

    /// No definition registered for the requested layer/version
    #[error("no schema registered for layer '{layer}'{}", version.map(|v| format!(" version {v}")).unwrap_or_default())]
    SchemaNotFound { layer: String, version: Option<u32> },

    /// A definition declared the same field name twice
    #[error("schema '{layer}' declares duplicate field '{field}'")]
    DuplicateField { layer: String, field: String },
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::SchemaNotFound {
            layer: "identity".to_string(),
            version: Some(2),
        };
        assert!(err.to_string().contains("identity"));
        assert!(err.to_string().contains("version 2"));

        let err = SchemaError::SchemaNotFound {
            layer: "identity".to_string(),
            version: None,
        };
        assert!(!err.to_string().contains("version"));
    }
}
