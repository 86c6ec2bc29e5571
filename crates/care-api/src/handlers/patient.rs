//! Patient handlers
//!
//! Registration, sign-in and profile endpoints under `/patient`.

use axum::extract::State;
use axum_extra::extract::CookieJar;
use care_backend::dto::{
    GetPrescriptionRequest, PatientRegistration, PatientSession as SignedInPatient, SignInRequest,
    UpdatePatientProfile,
};
use care_common::Role;
use serde::Deserialize;

use crate::auth::session_cookie;
use crate::extractors::{JsonBody, PatientSession, QueryParams};
use crate::response::{Acknowledged, ApiError, ApiResult, BackendJson};
use crate::state::AppState;

/// Self-registration body
#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: i64,
    pub age: i32,
    pub gender: String,
}

/// Email/password credentials, shared by every sign-in route
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl From<Credentials> for SignInRequest {
    fn from(credentials: Credentials) -> Self {
        Self {
            email: credentials.email,
            password: credentials.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Profile fields a patient may change
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub name: String,
    pub phone: i64,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrescriptionQuery {
    pub query: Option<String>,
}

/// Register a new patient
///
/// POST /patient/signup
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignUpBody>,
) -> ApiResult<BackendJson> {
    let request = PatientRegistration {
        email: body.email,
        password: body.password,
        name: body.name,
        phone: body.phone,
        age: body.age,
        gender: body.gender,
    };
    BackendJson::from_outcome(state.backend().patient.sign_up(&request).await)
}

/// Confirm a registration email
///
/// GET /patient/signup/verify-email?token=
pub async fn verify_email(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<VerifyEmailQuery>,
) -> ApiResult<BackendJson> {
    if query.token.trim().is_empty() {
        return Err(ApiError::invalid_query("token must not be empty"));
    }

    BackendJson::from_outcome(state.backend().patient.verify_email(&query.token).await)
}

/// Sign in and receive a `patienttoken` cookie
///
/// POST /patient/signin
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<(CookieJar, BackendJson<SignedInPatient>)> {
    let request = SignInRequest::from(credentials);
    let reply = BackendJson::from_outcome(state.backend().patient.sign_in(&request).await)?;

    let token = state.tokens().issue(&reply.0.data.patient_id, Role::Patient)?;
    tracing::info!(role = %Role::Patient, subject = %reply.0.data.patient_id, "Signed in");

    let cookie = session_cookie(Role::Patient, token, state.tokens().ttl_seconds());
    Ok((jar.add(cookie), reply))
}

/// POST /patient/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Acknowledged) {
    super::logout(jar, Role::Patient)
}

/// GET /patient/profile
pub async fn profile(
    State(state): State<AppState>,
    session: PatientSession,
) -> ApiResult<BackendJson> {
    BackendJson::from_outcome(state.backend().patient.profile(session.subject_id()).await)
}

/// PUT /patient/profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: PatientSession,
    JsonBody(body): JsonBody<ProfileBody>,
) -> ApiResult<BackendJson> {
    let request = UpdatePatientProfile {
        patient_id: session.subject_id().to_string(),
        name: body.name,
        phone: body.phone,
        age: body.age,
        gender: body.gender,
    };
    BackendJson::from_outcome(state.backend().patient.update_profile(&request).await)
}

/// The signed-in patient's prescriptions, optionally filtered
///
/// GET /patient/get-prescription?query=
pub async fn prescriptions(
    State(state): State<AppState>,
    session: PatientSession,
    QueryParams(query): QueryParams<PrescriptionQuery>,
) -> ApiResult<BackendJson> {
    let request = GetPrescriptionRequest {
        patient_id: session.subject_id().to_string(),
        doctor_id: None,
        query: query.query.filter(|q| !q.is_empty()),
    };
    BackendJson::from_outcome(state.backend().patient.prescriptions(&request).await)
}
