//! Adapter error types.

use crate::domain::ValidationError;
use crate::rejseplanen::UpstreamError;

/// Error from one adapter operation. Scoped to the call that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Arguments rejected before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A defect on our side
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdapterError {
    /// Short machine-readable name, used in logs and error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::Validation(_) => "validation_error",
            AdapterError::Upstream(UpstreamError::Timeout { .. }) => "upstream_timeout",
            AdapterError::Upstream(_) => "upstream_error",
            AdapterError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_transparent() {
        let err: AdapterError = ValidationError::empty("query").into();
        assert_eq!(err.to_string(), "invalid argument `query`: must not be empty");

        let err: AdapterError = UpstreamError::status(500, "down").into();
        assert_eq!(err.to_string(), "upstream returned HTTP 500: down");
    }

    #[test]
    fn kinds() {
        assert_eq!(
            AdapterError::from(ValidationError::missing("x")).kind(),
            "validation_error"
        );
        assert_eq!(
            AdapterError::from(UpstreamError::Timeout { timeout_secs: 3 }).kind(),
            "upstream_timeout"
        );
        assert_eq!(
            AdapterError::from(UpstreamError::Connection("refused".into())).kind(),
            "upstream_error"
        );
        assert_eq!(AdapterError::Internal("bug".into()).kind(), "internal_error");
    }
}
