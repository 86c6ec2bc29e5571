//! Stub backend and test data
//!
//! One axum router answers every `POST /rpc/{method}` the way the identity,
//! scheduling and billing services would, for a fixed set of accounts.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const PATIENT_EMAIL: &str = "patient@care.example";
pub const PATIENT_ID: &str = "P-1001";
pub const DOCTOR_EMAIL: &str = "doctor@care.example";
pub const DOCTOR_ID: &str = "D-2001";
pub const ADMIN_EMAIL: &str = "admin@care.example";
pub const PASSWORD: &str = "correct horse";

/// Sign-in body
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn patient() -> Self {
        Self::new(PATIENT_EMAIL, PASSWORD)
    }

    pub fn doctor() -> Self {
        Self::new(DOCTOR_EMAIL, PASSWORD)
    }

    pub fn admin() -> Self {
        Self::new(ADMIN_EMAIL, PASSWORD)
    }
}

/// A call the stub received
#[derive(Debug, Clone)]
pub struct StubCall {
    pub method: String,
    pub payload: Value,
}

/// Calls received by a running stub backend
#[derive(Debug, Clone, Default)]
pub struct StubLog(Arc<Mutex<Vec<StubCall>>>);

impl StubLog {
    pub fn calls(&self) -> Vec<StubCall> {
        self.0.lock().clone()
    }

    /// Payload of the most recent call to `method`
    pub fn last(&self, method: &str) -> Option<Value> {
        self.0
            .lock()
            .iter()
            .rev()
            .find(|call| call.method == method)
            .map(|call| call.payload.clone())
    }

    fn record(&self, method: &str, payload: &Value) {
        self.0.lock().push(StubCall {
            method: method.to_string(),
            payload: payload.clone(),
        });
    }
}

fn success(message: &str, data: Value) -> Value {
    let mut reply = json!({"status": "success", "statusCode": 200, "message": message});
    if let (Some(reply), Some(data)) = (reply.as_object_mut(), data.as_object()) {
        reply.extend(data.clone());
    }
    reply
}

fn failure(status_code: u16, message: &str) -> Value {
    json!({"status": "fail", "statusCode": status_code, "message": message})
}

fn check_password(payload: &Value, email: &str) -> bool {
    payload["email"] == email && payload["password"] == PASSWORD
}

async fn rpc(
    State(log): State<StubLog>,
    Path(method): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    log.record(&method, &payload);

    let reply = match method.as_str() {
        "PatientService.SignIn" if check_password(&payload, PATIENT_EMAIL) => {
            success("signed in", json!({"PatientId": PATIENT_ID}))
        }
        "DoctorService.SignIn" if check_password(&payload, DOCTOR_EMAIL) => {
            success("signed in", json!({"DoctorId": DOCTOR_ID}))
        }
        "AdminService.SignIn" if check_password(&payload, ADMIN_EMAIL) => {
            success("signed in", json!({}))
        }
        "PatientService.SignIn" | "DoctorService.SignIn" | "AdminService.SignIn" => {
            failure(401, "invalid email or password")
        }
        "PatientService.SignUp" if payload["email"] == PATIENT_EMAIL => {
            failure(409, "email already registered")
        }
        "PatientService.SignUp" => success("verification email sent", json!({})),
        "PatientService.GetProfile" => success(
            "profile fetched",
            json!({"patient": {"patientId": payload["patientId"], "name": "Asha"}}),
        ),
        "DoctorService.GetProfile" => success(
            "profile fetched",
            json!({"doctor": {"doctorId": payload["doctorId"], "name": "Dr. Rao"}}),
        ),
        "PatientService.AddPrescription" => success("prescription added", json!({})),
        "AdminService.ListPatients" => success(
            "patients",
            json!({"patients": [{"patientId": PATIENT_ID}]}),
        ),
        "AppointmentService.GetUpcomingAppointments" => {
            success("appointments", json!({"appointments": []}))
        }
        // Simulates a crashed billing service
        "PaymentService.CreateOrder" => {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    Json(reply).into_response()
}

/// Running stub backend
pub struct StubBackend {
    pub addr: SocketAddr,
    pub log: StubLog,
}

impl StubBackend {
    pub async fn start() -> anyhow::Result<Self> {
        let log = StubLog::default();
        let app = Router::new()
            .route("/rpc/:method", post(rpc))
            .with_state(log.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { addr, log })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}
