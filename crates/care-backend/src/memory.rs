//! In-process transport
//!
//! Answers calls from canned handlers and records every request. Used to run
//! the gateway without live backend services.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::RpcError;
use crate::transport::{RpcTransport, Service};

type Handler = Box<dyn Fn(&Value) -> Result<Value, RpcError> + Send + Sync>;

/// A call seen by [`InMemoryTransport`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub service: Service,
    pub method: String,
    pub payload: Value,
}

#[derive(Default)]
pub struct InMemoryTransport {
    handlers: HashMap<(Service, String), Handler>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with a handler computed from the request payload
    pub fn on<F>(mut self, service: Service, method: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.handlers
            .insert((service, method.to_string()), Box::new(handler));
        self
    }

    /// Answer `method` with a fixed reply body
    pub fn reply(self, service: Service, method: &str, body: Value) -> Self {
        self.on(service, method, move |_| Ok(body.clone()))
    }

    /// Fail `method` as if the service were down
    pub fn unavailable(self, service: Service, method: &str) -> Self {
        self.on(service, method, move |_| {
            Err(RpcError::Unavailable {
                service,
                reason: "connection refused".to_string(),
            })
        })
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RpcTransport for InMemoryTransport {
    async fn call(&self, service: Service, method: &str, payload: Value) -> Result<Value, RpcError> {
        let result = match self.handlers.get(&(service, method.to_string())) {
            Some(handler) => handler(&payload),
            None => Err(RpcError::Unavailable {
                service,
                reason: format!("no handler for {method}"),
            }),
        };

        self.calls.lock().push(RecordedCall {
            service,
            method: method.to_string(),
            payload,
        });

        result
    }
}
