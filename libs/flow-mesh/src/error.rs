//! # Mesh Errors
//!
//! Error types for tube tessellation and batch merging.

use flow_field::FieldError;
use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Invalid tessellation input (radius, segment counts).
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Meshes in one batch disagree on ring layout, or the batch is empty.
    ///
    /// This is a caller defect, not a recoverable user error.
    #[error("Invalid batch: {message}")]
    InvalidBatch { message: String },

    /// Merged vertex count does not fit the index type or the budget.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid batch error.
    pub fn invalid_batch(message: impl Into<String>) -> Self {
        Self::InvalidBatch {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_batch("mesh 3 has 6 radial segments, expected 8");
        assert!(err.to_string().contains("Invalid batch"));
        assert!(err.to_string().contains("mesh 3"));
    }

    #[test]
    fn test_field_error_is_transparent() {
        let err: MeshError = FieldError::invalid_parameter("tubeRadius", "must be positive").into();
        assert!(err.to_string().starts_with("Invalid parameter 'tubeRadius'"));
    }
}
