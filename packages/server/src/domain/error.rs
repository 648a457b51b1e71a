//! Domain errors.

use thiserror::Error;

/// Failure to build a value object from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Failure to deliver an event to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
    #[error("failed to serialize event: {0}")]
    Serialization(String),
}

/// Outcome of an execution attempt that did not produce a backend result.
///
/// None of these is fatal: each is reported to the requesting room or caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Free execution limit reached for today. Try again tomorrow.")]
    QuotaExceeded { limit: u32 },
    #[error("Execution backend error: {0}")]
    Backend(String),
}
