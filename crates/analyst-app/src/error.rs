//! Error types for event processing.

use crate::events::EventKey;
use analyst_render::PaintError;
use thiserror::Error;

/// Event processing errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Paint(#[from] PaintError),
    #[error("Processor `{processor}` cannot handle {event}: {reason}")]
    UnsupportedHandler {
        processor: String,
        event: EventKey,
        reason: &'static str,
    },
    #[error("Processor already exists: {0}")]
    DuplicateProcessor(String),
    #[error("Processor not found: {0}")]
    ProcessorNotFound(String),
    #[error("More than {0} chained interactions")]
    InteractionOverflow(usize),
    #[error("Handler failed: {0}")]
    Handler(String),
}

impl From<analyst_core::CoreError> for ProcessError {
    fn from(err: analyst_core::CoreError) -> Self {
        ProcessError::Paint(err.into())
    }
}

/// Result type for event processing.
pub type ProcessResult<T> = Result<T, ProcessError>;
