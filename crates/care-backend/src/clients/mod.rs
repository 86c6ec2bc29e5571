//! Typed clients, one per backend service area

mod admin;
mod appointment;
mod doctor;
mod patient;
mod payment;

use std::sync::Arc;

pub use admin::AdminClient;
pub use appointment::AppointmentClient;
pub use doctor::DoctorClient;
pub use patient::PatientClient;
pub use payment::PaymentClient;

use crate::transport::RpcTransport;

/// All backend clients sharing one transport
#[derive(Clone)]
pub struct BackendClients {
    pub patient: PatientClient,
    pub doctor: DoctorClient,
    pub admin: AdminClient,
    pub appointment: AppointmentClient,
    pub payment: PaymentClient,
}

impl BackendClients {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            patient: PatientClient::new(transport.clone()),
            doctor: DoctorClient::new(transport.clone()),
            admin: AdminClient::new(transport.clone()),
            appointment: AppointmentClient::new(transport.clone()),
            payment: PaymentClient::new(transport),
        }
    }
}
