//! Admin handlers
//!
//! Sign-in plus doctor and patient management under `/admin`.

use axum::extract::{Path, State};
use axum_extra::extract::CookieJar;
use care_backend::dto::{
    AddDoctorRequest, AddSpecializationRequest, BlockPatientRequest, PatientRegistration,
    SignInRequest,
};
use care_common::Role;
use serde::Deserialize;

use super::patient::{Credentials, SignUpBody};
use crate::auth::session_cookie;
use crate::extractors::{AdminSession, JsonBody};
use crate::response::{Acknowledged, ApiResult, BackendJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRegistrationBody {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: i64,
    pub specialization_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct BlockBody {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Sign in and receive an `admintoken` cookie; the subject is the email
///
/// POST /admin/signin
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<(CookieJar, BackendJson)> {
    let request = SignInRequest::from(credentials);
    let reply = BackendJson::from_outcome(state.backend().admin.sign_in(&request).await)?;

    let token = state.tokens().issue(&request.email, Role::Admin)?;
    tracing::info!(role = %Role::Admin, subject = %request.email, "Signed in");

    let cookie = session_cookie(Role::Admin, token, state.tokens().ttl_seconds());
    Ok((jar.add(cookie), reply))
}

/// POST /admin/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Acknowledged) {
    super::logout(jar, Role::Admin)
}

/// POST /admin/doctor/register
pub async fn register_doctor(
    State(state): State<AppState>,
    session: AdminSession,
    JsonBody(body): JsonBody<DoctorRegistrationBody>,
) -> ApiResult<BackendJson> {
    tracing::info!(admin = %session.subject_id(), email = %body.email, "Registering doctor");

    let request = AddDoctorRequest {
        email: body.email,
        password: body.password,
        name: body.name,
        phone: body.phone,
        specialization_id: body.specialization_id,
    };
    BackendJson::from_outcome(state.backend().admin.add_doctor(&request).await)
}

/// DELETE /admin/doctor/delete/{id}
pub async fn delete_doctor(
    State(state): State<AppState>,
    session: AdminSession,
    Path(doctor_id): Path<String>,
) -> ApiResult<BackendJson> {
    tracing::info!(admin = %session.subject_id(), %doctor_id, "Deleting doctor");
    BackendJson::from_outcome(state.backend().admin.delete_doctor(&doctor_id).await)
}

/// POST /admin/patient/register
pub async fn register_patient(
    State(state): State<AppState>,
    session: AdminSession,
    JsonBody(body): JsonBody<SignUpBody>,
) -> ApiResult<BackendJson> {
    tracing::info!(admin = %session.subject_id(), email = %body.email, "Registering patient");

    let request = PatientRegistration {
        email: body.email,
        password: body.password,
        name: body.name,
        phone: body.phone,
        age: body.age,
        gender: body.gender,
    };
    BackendJson::from_outcome(state.backend().admin.add_patient(&request).await)
}

/// DELETE /admin/patient/delete/{id}
pub async fn delete_patient(
    State(state): State<AppState>,
    session: AdminSession,
    Path(patient_id): Path<String>,
) -> ApiResult<BackendJson> {
    tracing::info!(admin = %session.subject_id(), %patient_id, "Deleting patient");
    BackendJson::from_outcome(state.backend().admin.delete_patient(&patient_id).await)
}

/// POST /admin/patient/block/{id}
pub async fn block_patient(
    State(state): State<AppState>,
    session: AdminSession,
    Path(patient_id): Path<String>,
    JsonBody(body): JsonBody<BlockBody>,
) -> ApiResult<BackendJson> {
    tracing::info!(admin = %session.subject_id(), %patient_id, "Blocking patient");

    let request = BlockPatientRequest {
        patient_id,
        reason: body.reason,
    };
    BackendJson::from_outcome(state.backend().admin.block_patient(&request).await)
}

/// GET /admin/patient/list
pub async fn list_patients(
    State(state): State<AppState>,
    _session: AdminSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(state.backend().admin.list_patients().await)
}

/// GET /admin/doctor/list
pub async fn list_doctors(
    State(state): State<AppState>,
    _session: AdminSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(state.backend().admin.list_doctors().await)
}

/// Add a doctor specialization
///
/// POST /admin/doctor/addcategory
pub async fn add_category(
    State(state): State<AppState>,
    _session: AdminSession,
    JsonBody(body): JsonBody<CategoryBody>,
) -> ApiResult<BackendJson> {
    let request = AddSpecializationRequest {
        name: body.name,
        description: body.description,
    };
    BackendJson::from_outcome(state.backend().appointment.add_specialization(&request).await)
}

/// GET /admin/dashboard/fetch
pub async fn dashboard(
    State(state): State<AppState>,
    _session: AdminSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(state.backend().appointment.dashboard().await)
}
