//! Error types for mapping operations

use thiserror::Error;

/// Errors that can occur while building or applying mapping plans
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// A source record was not a JSON object
    #[error("source record {index} is not an object")]
    RecordNotAnObject { index: usize },

    /// The plan leaves required target fields uncovered and the caller did
    /// not ask for a partial instance
    #[error("mapping plan leaves required fields unmatched: {}", missing.join(", "))]
    IncompletePlan { missing: Vec<String> },
}

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MappingError::IncompletePlan {
            missing: vec!["conformity".to_string(), "global_ids".to_string()],
        };
        assert!(err.to_string().contains("conformity"));
        assert!(err.to_string().contains("global_ids"));
    }
}
