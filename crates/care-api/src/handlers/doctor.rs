//! Doctor handlers
//!
//! Sign-in, profile, prescriptions and scheduling under `/doctor`.

use axum::extract::State;
use axum_extra::extract::CookieJar;
use care_backend::dto::{
    AddPrescriptionRequest, DoctorSession as SignedInDoctor, GetPrescriptionRequest, Medication,
    SignInRequest, UpdateDoctorProfile, VideoRoomRequest,
};
use care_common::Role;
use serde::Deserialize;

use super::patient::Credentials;
use crate::auth::session_cookie;
use crate::extractors::{DoctorSession, JsonBody, QueryParams};
use crate::response::{Acknowledged, ApiError, ApiResult, BackendJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub name: String,
    #[serde(rename = "specialization")]
    pub specialization_id: i32,
    pub phone: i64,
}

#[derive(Debug, Deserialize)]
pub struct PrescriptionBody {
    #[serde(rename = "patientid")]
    pub patient_id: String,
    pub prescription: Vec<Medication>,
}

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    #[serde(rename = "patientid")]
    pub patient_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoRoomBody {
    #[serde(rename = "patientid")]
    pub patient_id: String,
    #[serde(rename = "specialization")]
    pub specialization_id: i64,
}

/// Sign in and receive a `doctortoken` cookie
///
/// POST /doctor/signin
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<(CookieJar, BackendJson<SignedInDoctor>)> {
    let request = SignInRequest::from(credentials);
    let reply = BackendJson::from_outcome(state.backend().doctor.sign_in(&request).await)?;

    let token = state.tokens().issue(&reply.0.data.doctor_id, Role::Doctor)?;
    tracing::info!(role = %Role::Doctor, subject = %reply.0.data.doctor_id, "Signed in");

    let cookie = session_cookie(Role::Doctor, token, state.tokens().ttl_seconds());
    Ok((jar.add(cookie), reply))
}

/// POST /doctor/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Acknowledged) {
    super::logout(jar, Role::Doctor)
}

/// GET /doctor/profile
pub async fn profile(
    State(state): State<AppState>,
    session: DoctorSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(state.backend().doctor.profile(session.subject_id()).await)
}

/// PUT /doctor/profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: DoctorSession,
    JsonBody(body): JsonBody<ProfileBody>,
) -> ApiResult<BackendJson> {
    let request = UpdateDoctorProfile {
        doctor_id: session.subject_id().to_string(),
        name: body.name,
        specialization_id: body.specialization_id,
        phone: body.phone,
    };
    BackendJson::from_outcome(state.backend().doctor.update_profile(&request).await)
}

/// Prescribe medications to a patient
///
/// POST /doctor/add-prescription
pub async fn add_prescription(
    State(state): State<AppState>,
    session: DoctorSession,
    JsonBody(body): JsonBody<PrescriptionBody>,
) -> ApiResult<BackendJson> {
    if body.prescription.is_empty() {
        return Err(ApiError::invalid_body("prescription must list at least one medication"));
    }

    let request = AddPrescriptionRequest {
        doctor_id: session.subject_id().to_string(),
        patient_id: body.patient_id,
        prescription: body.prescription,
    };
    BackendJson::from_outcome(state.backend().patient.add_prescription(&request).await)
}

/// Prescriptions this doctor wrote for one patient
///
/// GET /doctor/get-prescription?patientid=
pub async fn prescriptions(
    State(state): State<AppState>,
    session: DoctorSession,
    QueryParams(query): QueryParams<PatientQuery>,
) -> ApiResult<BackendJson> {
    let request = GetPrescriptionRequest {
        patient_id: query.patient_id,
        doctor_id: Some(session.subject_id().to_string()),
        query: None,
    };
    BackendJson::from_outcome(state.backend().patient.prescriptions(&request).await)
}

/// POST /doctor/schedule/confirm
pub async fn confirm_schedule(
    State(state): State<AppState>,
    session: DoctorSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(
        state
            .backend()
            .doctor
            .confirm_schedule(session.subject_id())
            .await,
    )
}

/// Open a video consultation room with a patient
///
/// POST /doctor/video-room-create
pub async fn create_video_room(
    State(state): State<AppState>,
    session: DoctorSession,
    JsonBody(body): JsonBody<VideoRoomBody>,
) -> ApiResult<BackendJson> {
    let request = VideoRoomRequest {
        doctor_id: session.subject_id().to_string(),
        patient_id: body.patient_id,
        specialization_id: body.specialization_id,
    };
    BackendJson::from_outcome(state.backend().appointment.create_video_room(&request).await)
}
