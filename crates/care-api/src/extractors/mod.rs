//! Axum extractors for request handling
//!
//! Session extractors for authenticated handlers and body/query extractors
//! that reject malformed input with the gateway's error body.

mod json;
mod session;

pub use json::{JsonBody, QueryParams};
pub use session::{
    AdminRole, AdminSession, DoctorRole, DoctorSession, OptionalSession, PatientRole,
    PatientSession, RoleMarker, Session,
};
