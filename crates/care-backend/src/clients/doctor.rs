//! Doctor methods of the identity service

use std::sync::Arc;

use crate::dto::{DoctorIdRequest, DoctorSession, SignInRequest, UpdateDoctorProfile};
use crate::error::RpcError;
use crate::reply::Reply;
use crate::transport::{invoke, RpcTransport, Service};

#[derive(Clone)]
pub struct DoctorClient {
    transport: Arc<dyn RpcTransport>,
}

impl DoctorClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// On success the reply carries the doctor id used as token subject
    ///
    /// # Errors
    /// A successful reply without a doctor id is a `Decode` error
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<Reply<DoctorSession>, RpcError> {
        let reply: Reply<DoctorSession> =
            invoke(&*self.transport, Service::User, "DoctorService.SignIn", request).await?;

        if reply.is_success() && reply.data.doctor_id.is_empty() {
            return Err(RpcError::Decode {
                service: Service::User,
                reason: "sign-in succeeded without a DoctorId".to_string(),
            });
        }
        Ok(reply)
    }

    pub async fn profile(&self, doctor_id: &str) -> Result<Reply, RpcError> {
        let request = DoctorIdRequest {
            doctor_id: doctor_id.to_string(),
        };
        invoke(&*self.transport, Service::User, "DoctorService.GetProfile", &request).await
    }

    pub async fn update_profile(&self, request: &UpdateDoctorProfile) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "DoctorService.UpdateProfile", request).await
    }

    /// Publish the doctor's working schedule as bookable slots
    pub async fn confirm_schedule(&self, doctor_id: &str) -> Result<Reply, RpcError> {
        let request = DoctorIdRequest {
            doctor_id: doctor_id.to_string(),
        };
        invoke(&*self.transport, Service::User, "DoctorService.ConfirmSchedule", &request).await
    }
}
