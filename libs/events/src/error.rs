//! Error types for event extraction and decryption rebuilds.
//!
//! These describe *why* a document was rejected. The public factory
//! operations collapse them into `None` after logging.

use thiserror::Error;

use crate::EventKind;

/// Errors that can occur when handling transport documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A required field is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The document matches none of the accepted envelope shapes.
    #[error("unrecognized envelope shape: {0}")]
    UnrecognizedShape(String),

    /// A decryption rebuild was requested for an event that is not encrypted.
    #[error("event of kind {kind} is not encrypted")]
    NotEncrypted { kind: EventKind },

    /// The decrypted replacement did not classify to a known kind.
    #[error("decrypted payload is unusable: {0}")]
    UnusableDecryptedPayload(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EventError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EventError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}

impl From<relay_id::IdError> for EventError {
    fn from(err: relay_id::IdError) -> Self {
        EventError::invalid("id", err.to_string())
    }
}
