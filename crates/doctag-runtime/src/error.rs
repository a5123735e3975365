//! Error types for event dispatch and decoding

use thiserror::Error;

/// Result type alias for event operations
pub type EventResult<T> = Result<T, EventError>;

/// Error type for event operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The envelope's event type has no apply method on the aggregate
    #[error("{aggregate} aggregate: unexpected event type {event_type:?}")]
    UnexpectedEventType {
        aggregate: String,
        event_type: String,
    },

    /// The payload could not be turned back into a typed event
    #[error("failed to decode {event_type} event: {reason}")]
    Decode { event_type: String, reason: String },

    /// The event could not be serialized into a payload
    #[error("failed to encode {event_type} event: {reason}")]
    Encode { event_type: String, reason: String },
}

impl EventError {
    /// Create an [`EventError::UnexpectedEventType`]
    pub fn unexpected_event_type(aggregate: impl Into<String>, event_type: impl Into<String>) -> Self {
        EventError::UnexpectedEventType {
            aggregate: aggregate.into(),
            event_type: event_type.into(),
        }
    }

    /// Create an [`EventError::Decode`]
    pub fn decode(event_type: impl Into<String>, reason: impl ToString) -> Self {
        EventError::Decode {
            event_type: event_type.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an [`EventError::Encode`]
    pub fn encode(event_type: impl Into<String>, reason: impl ToString) -> Self {
        EventError::Encode {
            event_type: event_type.into(),
            reason: reason.to_string(),
        }
    }

    /// The event type the error is about
    pub fn event_type(&self) -> &str {
        match self {
            EventError::UnexpectedEventType { event_type, .. }
            | EventError::Decode { event_type, .. }
            | EventError::Encode { event_type, .. } => event_type,
        }
    }
}
