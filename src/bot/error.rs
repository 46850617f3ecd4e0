//! Strategy error types

use thiserror::Error;

/// Failure of the outbound completion call, with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub message: String,
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Unknown, message)
    }
}

/// Error classification, surfaced in structured logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Authentication failed (401, 403)
    Auth,
    /// Bad request (400)
    InvalidRequest,
    /// Unknown error
    Unknown,
}

impl UpstreamErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamErrorKind::Network => "network",
            UpstreamErrorKind::RateLimit => "rate_limit",
            UpstreamErrorKind::ServerError => "server_error",
            UpstreamErrorKind::Auth => "auth",
            UpstreamErrorKind::InvalidRequest => "invalid_request",
            UpstreamErrorKind::Unknown => "unknown",
        }
    }
}

/// Errors a response strategy can surface to the endpoint
#[derive(Debug, Error)]
pub enum BotError {
    /// Malformed or missing input shape; reported as a 400-class response
    #[error("{0}")]
    Validation(String),
    /// The external completion call failed; reported as a 500-class response
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
