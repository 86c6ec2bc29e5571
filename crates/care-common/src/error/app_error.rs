//! Application error types
//!
//! Unified error handling for the entire gateway.

use crate::auth::Role;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Missing session credential")]
    MissingAuth,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Authorization errors
    #[error("Route requires role {required}, credential grants {actual}")]
    WrongRole { required: Role, actual: Role },

    // Upstream errors
    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{message}")]
    UpstreamRejected { status_code: u16, message: String },

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::MissingAuth | Self::InvalidToken | Self::TokenExpired => 401,

            // 403 Forbidden
            Self::WrongRole { .. } => 403,

            // Backend-reported status, passed through when it is a real error status
            Self::UpstreamRejected { status_code, .. } => {
                if (400..600).contains(status_code) {
                    *status_code
                } else {
                    502
                }
            }

            // 502 Bad Gateway
            Self::UpstreamUnavailable(_) => 502,

            // 500 Internal Server Error
            Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuth => "MISSING_AUTH",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::WrongRole { .. } => "FORBIDDEN",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
