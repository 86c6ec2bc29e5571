//! Backend request and reply payloads
//!
//! Field names follow the backend wire format (camelCase). Gateway-facing
//! request bodies live with the HTTP handlers and are translated into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity service
// ============================================================================

/// Email/password credential pair
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Patient self-registration or admin-created patient
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: i64,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Lookup or delete keyed by a principal id
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIdRequest {
    pub patient_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorIdRequest {
    pub doctor_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientProfile {
    pub patient_id: String,
    pub name: String,
    pub phone: i64,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorProfile {
    pub doctor_id: String,
    pub name: String,
    pub specialization_id: i32,
    pub phone: i64,
}

/// One prescribed medication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPrescriptionRequest {
    pub doctor_id: String,
    pub patient_id: String,
    pub prescription: Vec<Medication>,
}

/// Prescription lookup; `query` filters by free text
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPrescriptionRequest {
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDoctorRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: i64,
    pub specialization_id: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatientRequest {
    pub patient_id: String,
    pub reason: String,
}

/// Sign-in payload of the patient method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSession {
    /// Absent on failed sign-ins
    #[serde(rename = "PatientId", default)]
    pub patient_id: String,
}

/// Sign-in payload of the doctor method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSession {
    /// Absent on failed sign-ins
    #[serde(rename = "DoctorId", default)]
    pub doctor_id: String,
}

// ============================================================================
// Scheduling service
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub category_id: i32,
    pub requested_date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub specialization_id: i32,
    pub appointment_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    pub patient_id: String,
    pub appointment_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRoomRequest {
    pub doctor_id: String,
    pub patient_id: String,
    pub specialization_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSpecializationRequest {
    pub name: String,
    pub description: String,
}

// ============================================================================
// Billing service
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub patient_id: String,
    pub appointment_id: String,
}

/// No request fields
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}
