//! Response types and error handling for gateway endpoints
//!
//! Every error renders as `{status: "fail", error, code, message, statusCode}`;
//! backend replies are passed through with the backend's own status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use care_backend::{Reply, RpcError};
use care_common::AppError;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::InvalidBody(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
        }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        Self::App(err.into())
    }
}

/// Standard status body shared by errors and plain acknowledgements
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        // Upstream and internal detail stays in the log
        let message = match &self {
            Self::App(AppError::UpstreamUnavailable(_)) => "Upstream service unavailable".to_string(),
            Self::App(AppError::Internal(_)) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = StatusBody {
            status: "fail",
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: Some(self.error_code().to_string()),
            message,
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Successful acknowledgement with a message (200)
pub struct Acknowledged(pub String);

impl IntoResponse for Acknowledged {
    fn into_response(self) -> Response {
        let body = StatusBody {
            status: "success",
            error: String::new(),
            code: None,
            message: self.0,
            status_code: StatusCode::OK.as_u16(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

/// A successful backend reply, rendered with the backend's status code
pub struct BackendJson<T = Map<String, Value>>(pub Reply<T>);

impl<T> BackendJson<T> {
    /// Accept a backend outcome, turning non-success statuses into errors
    ///
    /// # Errors
    /// Transport failures become `UpstreamUnavailable`, non-success replies
    /// become `UpstreamRejected`
    pub fn from_outcome(outcome: Result<Reply<T>, RpcError>) -> ApiResult<Self> {
        Ok(Self(outcome?.into_result()?))
    }
}

impl<T: Serialize> IntoResponse for BackendJson<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code)
            .ok()
            .filter(StatusCode::is_success)
            .unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}
