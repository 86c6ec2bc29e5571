//! Patient methods of the identity service

use std::sync::Arc;

use crate::dto::{
    AddPrescriptionRequest, GetPrescriptionRequest, PatientIdRequest, PatientRegistration,
    PatientSession, SignInRequest, UpdatePatientProfile, VerifyEmailRequest,
};
use crate::error::RpcError;
use crate::reply::Reply;
use crate::transport::{invoke, RpcTransport, Service};

/// Client for patient accounts and prescriptions
#[derive(Clone)]
pub struct PatientClient {
    transport: Arc<dyn RpcTransport>,
}

impl PatientClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn sign_up(&self, request: &PatientRegistration) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "PatientService.SignUp", request).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<Reply, RpcError> {
        let request = VerifyEmailRequest {
            token: token.to_string(),
        };
        invoke(&*self.transport, Service::User, "PatientService.VerifyEmail", &request).await
    }

    /// On success the reply carries the patient id used as token subject
    ///
    /// # Errors
    /// A successful reply without a patient id is a `Decode` error
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<Reply<PatientSession>, RpcError> {
        let reply: Reply<PatientSession> =
            invoke(&*self.transport, Service::User, "PatientService.SignIn", request).await?;

        if reply.is_success() && reply.data.patient_id.is_empty() {
            return Err(RpcError::Decode {
                service: Service::User,
                reason: "sign-in succeeded without a PatientId".to_string(),
            });
        }
        Ok(reply)
    }

    pub async fn profile(&self, patient_id: &str) -> Result<Reply, RpcError> {
        let request = PatientIdRequest {
            patient_id: patient_id.to_string(),
        };
        invoke(&*self.transport, Service::User, "PatientService.GetProfile", &request).await
    }

    pub async fn update_profile(&self, request: &UpdatePatientProfile) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "PatientService.UpdateProfile", request).await
    }

    pub async fn add_prescription(&self, request: &AddPrescriptionRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "PatientService.AddPrescription", request).await
    }

    pub async fn prescriptions(&self, request: &GetPrescriptionRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "PatientService.GetPrescription", request).await
    }
}
