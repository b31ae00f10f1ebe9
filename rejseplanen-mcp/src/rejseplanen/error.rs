//! Upstream error types.

/// Longest slice of an upstream body kept for diagnostics.
const MAX_BODY_CHARS: usize = 500;

/// Errors from a call to the Rejseplanen API.
///
/// None of these are retried locally; the caller owns retry policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 2xx but the body is not JSON
    #[error("upstream returned malformed JSON (HTTP {status}): {message}")]
    InvalidJson {
        status: u16,
        message: String,
        body: String,
    },

    /// No response within the configured timeout
    #[error("request to upstream timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Connection refused, DNS failure, TLS failure, ...
    #[error("upstream request failed: {0}")]
    Connection(String),
}

impl UpstreamError {
    /// Build a `Status` error, truncating the body.
    pub fn status(status: u16, body: &str) -> Self {
        UpstreamError::Status {
            status,
            body: truncate_body(body),
        }
    }

    /// The HTTP status the upstream sent, if it sent one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } | UpstreamError::InvalidJson { status, .. } => {
                Some(*status)
            }
            UpstreamError::Timeout { .. } | UpstreamError::Connection(_) => None,
        }
    }

    /// Whether this was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}

/// Keep at most `MAX_BODY_CHARS` characters of a body.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_BODY_CHARS).collect()
}
