//! Error types for the merchant auth gateway.

/// Bearer credential verification failures.
///
/// Callers treat all three the same way (reject as unauthorized); the
/// distinction exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("token signature mismatch")]
    SignatureMismatch,
}

/// Failures talking to the merchant platform.
///
/// `Network` and `Rejected` are surfaced only in logs; clients see a
/// uniform authentication failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Network(String),

    #[error("{0}")]
    Rejected(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
