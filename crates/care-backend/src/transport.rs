//! Backend RPC transport
//!
//! Every backend call is a JSON request/reply exchange addressed by service
//! and method. The gateway holds no state across calls.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::RpcError;
use crate::reply::Reply;

/// Backend service a call is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Identity: patients, doctors, admins, prescriptions
    User,
    /// Scheduling: availability, appointments, video rooms
    Appointment,
    /// Billing: payment orders
    Payment,
}

impl Service {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Appointment => "appointment",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request/reply channel to the backend services
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send `payload` to `method` on `service` and return the raw reply body
    async fn call(&self, service: Service, method: &str, payload: Value) -> Result<Value, RpcError>;
}

/// Base URLs of the backend services
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub user: String,
    pub appointment: String,
    pub payment: String,
}

impl Endpoints {
    fn base(&self, service: Service) -> &str {
        match service {
            Service::User => &self.user,
            Service::Appointment => &self.appointment,
            Service::Payment => &self.payment,
        }
    }

    /// Full URL of a method: `{base}/rpc/{method}`
    #[must_use]
    pub fn method_url(&self, service: Service, method: &str) -> String {
        format!("{}/rpc/{method}", self.base(service).trim_end_matches('/'))
    }
}

/// JSON-over-HTTP transport
#[derive(Debug, Clone)]
pub struct HttpRpcTransport {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpRpcTransport {
    /// Build a transport with a per-call timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn call(&self, service: Service, method: &str, payload: Value) -> Result<Value, RpcError> {
        let url = self.endpoints.method_url(service, method);
        let unavailable = |reason: String| RpcError::Unavailable { service, reason };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("{method} answered HTTP {status}")));
        }

        response.json::<Value>().await.map_err(|e| RpcError::Decode {
            service,
            reason: e.to_string(),
        })
    }
}

/// Encode a typed request, call the backend and decode the reply envelope
///
/// The reply is returned whatever its business status; callers decide
/// whether a non-success status is an error.
pub(crate) async fn invoke<Req, T>(
    transport: &dyn RpcTransport,
    service: Service,
    method: &str,
    request: &Req,
) -> Result<Reply<T>, RpcError>
where
    Req: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let payload = serde_json::to_value(request).map_err(|e| RpcError::Encode {
        method: method.to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(%service, method, "Calling backend");

    let raw = transport
        .call(service, method, payload)
        .await
        .inspect_err(|e| tracing::warn!(%service, method, error = %e, "Backend call failed"))?;

    serde_json::from_value(raw).map_err(|e| RpcError::Decode {
        service,
        reason: e.to_string(),
    })
}
