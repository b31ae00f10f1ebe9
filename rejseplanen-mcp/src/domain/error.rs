//! Domain error types.
//!
//! These errors represent argument validation failures that are detected
//! before any request reaches the upstream API.

/// A required argument was missing, empty, or had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argument `{field}`: {message}")]
pub struct ValidationError {
    /// Name of the offending argument, as the caller spelled it.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The argument was absent or null.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }

    /// The argument was present but blank.
    pub fn empty(field: impl Into<String>) -> Self {
        Self::new(field, "must not be empty")
    }
}
