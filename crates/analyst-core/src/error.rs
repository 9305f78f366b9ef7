//! Scene errors.

use thiserror::Error;

/// Errors raised while building or editing a scene.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Duplicate visual name: {0}")]
    DuplicateVisual(String),
    #[error("Visual not found: {0}")]
    VisualNotFound(String),
    #[error("Invalid field `{field}`: expected {expected}, got {actual}")]
    InvalidField {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Field `{field}` of visual `{visual}` has {actual} entries, expected {expected}")]
    SizeMismatch {
        visual: String,
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for scene operations.
pub type CoreResult<T> = Result<T, CoreError>;
