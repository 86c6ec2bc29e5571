//! Backend reply envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RpcError;

/// Status string the backend uses for a successful call
pub const SUCCESS: &str = "success";

/// Reply envelope shared by every backend method
///
/// `status`, `statusCode` and `message` are always present; anything else the
/// backend returns lands in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply<T = Map<String, Value>> {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Reply<T> {
    /// Whether the backend reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }

    /// Turn a non-success reply into a rejection
    ///
    /// # Errors
    /// Returns `RpcError::Rejected` carrying the backend's code and message
    pub fn into_result(self) -> Result<Self, RpcError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RpcError::Rejected {
                status_code: self.status_code,
                message: self.message,
            })
        }
    }
}
