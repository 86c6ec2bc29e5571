//! Payment handlers

use axum::extract::State;
use care_backend::dto::CreateOrderRequest;
use serde::Deserialize;

use crate::extractors::{JsonBody, PatientSession};
use crate::response::{ApiResult, BackendJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderBody {
    #[serde(rename = "appointmentid")]
    pub appointment_id: String,
}

/// Create a payment order for one of the patient's appointments
///
/// POST /payment/order
pub async fn create_order(
    State(state): State<AppState>,
    session: PatientSession,
    JsonBody(body): JsonBody<OrderBody>,
) -> ApiResult<BackendJson> {
    let request = CreateOrderRequest {
        patient_id: session.subject_id().to_string(),
        appointment_id: body.appointment_id,
    };
    BackendJson::from_outcome(state.backend().payment.create_order(&request).await)
}
