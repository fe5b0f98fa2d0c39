//! # Pipeline Errors
//!
//! Error types for batch generation and the regeneration lifecycle.

use flow_field::FieldError;
use flow_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur while generating or publishing a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Generation parameters were rejected before any work started.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Tessellation or merging failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// A newer request started before this build finished.
    ///
    /// Internal cancellation signal; the background path never reports it
    /// as a failure.
    #[error("Generation {generation} was superseded by a newer request")]
    Superseded { generation: u64 },

    /// The background worker is no longer running.
    #[error("Regeneration worker stopped")]
    WorkerStopped,
}

impl PipelineError {
    /// Returns true for the cancellation signal.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }

    /// Returns the offending parameter name for validation failures.
    pub fn parameter_name(&self) -> Option<&'static str> {
        match self {
            Self::Field(err) | Self::Mesh(MeshError::Field(err)) => err.parameter_name(),
            _ => None,
        }
    }
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
