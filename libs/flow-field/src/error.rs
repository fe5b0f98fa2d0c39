//! # Field Errors
//!
//! Error types raised at the generation-parameter boundary. Field sampling
//! and integration themselves are total and never fail.

use thiserror::Error;

/// Errors that can occur before a streamline batch is generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// A generation parameter violates its constraint.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Field name as exposed to callers (camelCase).
        name: &'static str,
        /// Human-readable constraint description.
        reason: String,
    },

    /// The batch described by the parameters exceeds the vertex budget.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: u64, max: usize },
}

impl FieldError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the offending parameter name, if this is a parameter error.
    pub fn parameter_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            Self::TooManyVertices { .. } => None,
        }
    }
}

/// Result type alias for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::invalid_parameter("radialSegments", "must be at least 3, got 2");
        let message = err.to_string();
        assert!(message.contains("radialSegments"));
        assert!(message.contains("at least 3"));
    }

    #[test]
    fn test_parameter_name() {
        let err = FieldError::invalid_parameter("tubeRadius", "must be positive");
        assert_eq!(err.parameter_name(), Some("tubeRadius"));

        let err = FieldError::TooManyVertices { count: 11, max: 10 };
        assert_eq!(err.parameter_name(), None);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }
}
