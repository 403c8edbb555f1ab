//! Error types for ontology loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the ontology index
#[derive(Error, Debug)]
pub enum OntologyError {
    /// Failed to read a dictionary source file
    #[error("failed to read ontology source: {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parse failure in a dictionary source
    #[error("malformed ontology source '{source_id}' at position {position}: {message}")]
    Malformed {
        source_id: String,
        position: u64,
        message: String,
    },

    /// A dictionary entry is missing a required attribute
    #[error("ontology source '{source_id}': element '{element}' is missing attribute '{attribute}'")]
    MissingAttribute {
        source_id: String,
        element: &'static str,
        attribute: &'static str,
    },

    /// A term references a unit code absent from the unit dictionary
    #[error("term '{term}' references unknown unit '{unit}'")]
    UnknownUnit { term: String, unit: String },

    /// A term property declares a kind outside the recognized set
    #[error("term '{term}' property '{property}' has unrecognized kind: {message}")]
    UnknownPropertyKind {
        term: String,
        property: String,
        message: String,
    },

    /// No dictionary sources were provided
    #[error("no ontology dictionary sources provided")]
    NoSources,
}

/// Result type for ontology operations
pub type OntologyResult<T> = Result<T, OntologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OntologyError::UnknownUnit {
            term: "0173-101-ABX123".to_string(),
            unit: "unit_nm".to_string(),
        };
        assert!(err.to_string().contains("0173-101-ABX123"));
        assert!(err.to_string().contains("unit_nm"));
    }
}
