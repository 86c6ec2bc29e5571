//! HTTP integration tests
//!
//! Each test spawns a gateway and a stub backend on ephemeral ports.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, session_cookie, Credentials, TestServer, DOCTOR_ID, PASSWORD,
    PATIENT_EMAIL, PATIENT_ID,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health", None).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health", None).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Sign-in and sessions
// ============================================================================

#[tokio::test]
async fn test_patient_sign_in_and_profile() {
    let server = TestServer::start().await.expect("Failed to start server");

    let cookie = server.sign_in("patient", &Credentials::patient()).await.unwrap();
    assert!(cookie.starts_with("patienttoken="));

    let response = server
        .get("/api/v1/patient/profile", Some(&cookie))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["patient"]["patientId"], PATIENT_ID);

    let forwarded = server.backend.log.last("PatientService.GetProfile").unwrap();
    assert_eq!(forwarded["patientId"], PATIENT_ID);
}

#[tokio::test]
async fn test_wrong_password_sets_no_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/v1/patient/signin",
            None,
            &Credentials::new(PATIENT_EMAIL, "wrong"),
        )
        .await
        .unwrap();

    assert!(session_cookie(&response).is_none());
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn test_protected_route_without_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/doctor/profile", None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["statusCode"], 401);

    // The backend never saw the request
    assert!(server.backend.log.last("DoctorService.GetProfile").is_none());
}

#[tokio::test]
async fn test_patient_token_on_doctor_route_is_forbidden() {
    let server = TestServer::start().await.expect("Failed to start server");
    let cookie = server.sign_in("patient", &Credentials::patient()).await.unwrap();

    let response = server
        .get("/api/v1/doctor/profile", Some(&cookie))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_tampered_cookie_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let cookie = server.sign_in("doctor", &Credentials::doctor()).await.unwrap();
    let tampered = format!("{cookie}x");

    let response = server
        .get("/api/v1/doctor/profile", Some(&tampered))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_doctor_prescription_uses_session_identity() {
    let server = TestServer::start().await.expect("Failed to start server");
    let cookie = server.sign_in("doctor", &Credentials::doctor()).await.unwrap();

    let response = server
        .post(
            "/api/v1/doctor/add-prescription",
            Some(&cookie),
            &json!({
                "patientid": PATIENT_ID,
                "prescription": [
                    {"medication": "amoxicillin", "dosage": "500mg", "frequency": "3x daily"}
                ]
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let forwarded = server
        .backend
        .log
        .last("PatientService.AddPrescription")
        .unwrap();
    assert_eq!(forwarded["doctorId"], DOCTOR_ID);
    assert_eq!(forwarded["patientId"], PATIENT_ID);
    assert_eq!(forwarded["prescription"][0]["dosage"], "500mg");
}

#[tokio::test]
async fn test_admin_lists_patients() {
    let server = TestServer::start().await.expect("Failed to start server");
    let cookie = server.sign_in("admin", &Credentials::admin()).await.unwrap();
    assert!(cookie.starts_with("admintoken="));

    let response = server
        .get("/api/v1/admin/patient/list", Some(&cookie))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["patients"][0]["patientId"], PATIENT_ID);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/patient/logout", None, &json!({}))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap();
    assert!(set_cookie.starts_with("patienttoken=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "success");
}

// ============================================================================
// Backend passthrough
// ============================================================================

#[tokio::test]
async fn test_backend_rejection_status_passes_through() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/v1/patient/signup",
            None,
            &json!({
                "email": PATIENT_EMAIL,
                "password": PASSWORD,
                "name": "Asha",
                "phone": 9_876_543_210_i64,
                "age": 34,
                "gender": "female"
            }),
        )
        .await
        .unwrap();

    let body: Value = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body["message"], "email already registered");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/patient/signup", None, &json!({"email": "new@care.example"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(server.backend.log.last("PatientService.SignUp").is_none());
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let server = TestServer::start().await.expect("Failed to start server");
    let cookie = server.sign_in("patient", &Credentials::patient()).await.unwrap();

    let response = server
        .post(
            "/api/v1/payment/order",
            Some(&cookie),
            &json!({"appointmentid": "A-1"}),
        )
        .await
        .unwrap();

    let body: Value = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(body["message"], "Upstream service unavailable");
}
