//! Admin methods of the identity service

use std::sync::Arc;

use crate::dto::{
    AddDoctorRequest, BlockPatientRequest, DoctorIdRequest, Empty, PatientIdRequest,
    PatientRegistration, SignInRequest,
};
use crate::error::RpcError;
use crate::reply::Reply;
use crate::transport::{invoke, RpcTransport, Service};

/// Client for account administration
#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<dyn RpcTransport>,
}

impl AdminClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.SignIn", request).await
    }

    pub async fn add_doctor(&self, request: &AddDoctorRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.AddDoctor", request).await
    }

    pub async fn delete_doctor(&self, doctor_id: &str) -> Result<Reply, RpcError> {
        let request = DoctorIdRequest {
            doctor_id: doctor_id.to_string(),
        };
        invoke(&*self.transport, Service::User, "AdminService.DeleteDoctor", &request).await
    }

    pub async fn add_patient(&self, request: &PatientRegistration) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.AddPatient", request).await
    }

    pub async fn delete_patient(&self, patient_id: &str) -> Result<Reply, RpcError> {
        let request = PatientIdRequest {
            patient_id: patient_id.to_string(),
        };
        invoke(&*self.transport, Service::User, "AdminService.DeletePatient", &request).await
    }

    pub async fn block_patient(&self, request: &BlockPatientRequest) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.BlockPatient", request).await
    }

    pub async fn list_patients(&self) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.ListPatients", &Empty {}).await
    }

    pub async fn list_doctors(&self) -> Result<Reply, RpcError> {
        invoke(&*self.transport, Service::User, "AdminService.ListDoctors", &Empty {}).await
    }
}
