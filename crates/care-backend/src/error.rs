//! RPC boundary errors

use care_common::AppError;

use crate::transport::Service;

/// Failure of a single backend call
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The call never produced a reply (connect error, timeout, non-2xx transport status)
    #[error("{service} service unavailable: {reason}")]
    Unavailable { service: Service, reason: String },

    /// The reply could not be decoded into the expected shape
    #[error("{service} service sent an undecodable reply: {reason}")]
    Decode { service: Service, reason: String },

    /// The request could not be encoded
    #[error("failed to encode {method} request: {reason}")]
    Encode { method: String, reason: String },

    /// Transport succeeded but the backend reported a non-success status
    #[error("{message}")]
    Rejected { status_code: u16, message: String },
}

impl From<RpcError> for AppError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Rejected {
                status_code,
                message,
            } => AppError::UpstreamRejected {
                status_code,
                message,
            },
            RpcError::Unavailable { .. } | RpcError::Decode { .. } => {
                AppError::UpstreamUnavailable(err.to_string())
            }
            RpcError::Encode { .. } => AppError::internal(err),
        }
    }
}
