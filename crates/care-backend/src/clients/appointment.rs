//! Scheduling service client

use std::sync::Arc;

use crate::dto::{
    AddSpecializationRequest, AvailabilityRequest, CancelAppointmentRequest,
    ConfirmAppointmentRequest, DoctorIdRequest, Empty, PatientIdRequest, VideoRoomRequest,
};
use crate::error::RpcError;
use crate::reply::Reply;
use crate::transport::{invoke, RpcTransport, Service};

#[derive(Clone)]
pub struct AppointmentClient {
    transport: Arc<dyn RpcTransport>,
}

impl AppointmentClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Free slots for a specialization around a requested time
    pub async fn availability(&self, request: &AvailabilityRequest) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.CheckAvailability",
            request,
        )
        .await
    }

    pub async fn doctor_availability(&self, doctor_id: &str) -> Result<Reply, RpcError> {
        let request = DoctorIdRequest {
            doctor_id: doctor_id.to_string(),
        };
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.CheckAvailabilityByDoctorId",
            &request,
        )
        .await
    }

    pub async fn confirm(&self, request: &ConfirmAppointmentRequest) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.ConfirmAppointment",
            request,
        )
        .await
    }

    pub async fn cancel(&self, request: &CancelAppointmentRequest) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.CancelAppointment",
            request,
        )
        .await
    }

    pub async fn upcoming(&self, patient_id: &str) -> Result<Reply, RpcError> {
        let request = PatientIdRequest {
            patient_id: patient_id.to_string(),
        };
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.GetUpcomingAppointments",
            &request,
        )
        .await
    }

    pub async fn create_video_room(&self, request: &VideoRoomRequest) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.CreateRoomForVideoTreatment",
            request,
        )
        .await
    }

    pub async fn add_specialization(
        &self,
        request: &AddSpecializationRequest,
    ) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.AddSpecialization",
            request,
        )
        .await
    }

    /// Aggregate figures for the admin dashboard
    pub async fn dashboard(&self) -> Result<Reply, RpcError> {
        invoke(
            &*self.transport,
            Service::Appointment,
            "AppointmentService.FetchDashboard",
            &Empty {},
        )
        .await
    }
}
