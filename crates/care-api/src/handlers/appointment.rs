//! Appointment handlers
//!
//! Scheduling endpoints available to signed-in patients.

use axum::extract::State;
use care_backend::dto::{AvailabilityRequest, CancelAppointmentRequest, ConfirmAppointmentRequest};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::extractors::{JsonBody, PatientSession};
use crate::response::{ApiResult, BackendJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailabilityBody {
    #[serde(rename = "categoryid")]
    pub category_id: i32,
    #[serde(rename = "requesteddatetime")]
    pub requested_date_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DoctorAvailabilityBody {
    #[serde(rename = "doctorid")]
    pub doctor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmBody {
    #[serde(rename = "specializationid")]
    pub specialization_id: i32,
    #[serde(rename = "appointmenttime")]
    pub appointment_time: DateTime<Utc>,
    #[serde(rename = "doctorid")]
    pub doctor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CancelBody {
    #[serde(rename = "appointmentid")]
    pub appointment_id: String,
}

/// Open slots for a specialization around a requested time
///
/// GET /patient/get-availability
pub async fn availability(
    State(state): State<AppState>,
    _session: PatientSession,
    JsonBody(body): JsonBody<AvailabilityBody>,
) -> ApiResult<BackendJson> {
    let request = AvailabilityRequest {
        category_id: body.category_id,
        requested_date_time: body.requested_date_time,
    };
    BackendJson::from_outcome(state.backend().appointment.availability(&request).await)
}

/// GET /patient/get-doctor-availability
pub async fn doctor_availability(
    State(state): State<AppState>,
    _session: PatientSession,
    JsonBody(body): JsonBody<DoctorAvailabilityBody>,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(
        state
            .backend()
            .appointment
            .doctor_availability(&body.doctor_id)
            .await,
    )
}

/// Upcoming appointments of the signed-in patient
///
/// GET /patient/get-appointments
pub async fn upcoming(
    State(state): State<AppState>,
    session: PatientSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(
        state
            .backend()
            .appointment
            .upcoming(session.subject_id())
            .await,
    )
}

/// POST /patient/confirm-appointment
pub async fn confirm(
    State(state): State<AppState>,
    session: PatientSession,
    JsonBody(body): JsonBody<ConfirmBody>,
) -> ApiResult<BackendJson> {
    let request = ConfirmAppointmentRequest {
        patient_id: session.subject_id().to_string(),
        doctor_id: body.doctor_id,
        specialization_id: body.specialization_id,
        appointment_time: body.appointment_time,
    };
    BackendJson::from_outcome(state.backend().appointment.confirm(&request).await)
}

/// POST /patient/cancel-appointment
pub async fn cancel(
    State(state): State<AppState>,
    session: PatientSession,
    JsonBody(body): JsonBody<CancelBody>,
) -> ApiResult<BackendJson> {
    let request = CancelAppointmentRequest {
        patient_id: session.subject_id().to_string(),
        appointment_id: body.appointment_id,
    };
    BackendJson::from_outcome(state.backend().appointment.cancel(&request).await)
}
