//! Billing service client

use std::sync::Arc;

use crate::dto::CreateOrderRequest;
use crate::error::RpcError;
use crate::reply::Reply;
use crate::transport::{invoke, RpcTransport, Service};

#[derive(Clone)]
pub struct PaymentClient {
    transport: Arc<dyn RpcTransport>,
}

impl PaymentClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Open a payment order for an appointment
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::Payment, "PaymentService.CreateOrder", request).await
    }
}
