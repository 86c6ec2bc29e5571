//! Route definitions
//!
//! All API routes are mounted under `/api/v1`. Each prefix has a public router
//! and a private one wrapped in the role guard for that prefix.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use care_common::{Role, TokenService};

use crate::auth::with_role;
use crate::handlers::{admin, appointment, chat, doctor, health, patient, payment};
use crate::state::AppState;

/// Create the API router (health routes are separate)
pub fn create_router(tokens: &Arc<TokenService>) -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes(tokens))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/relay", get(health::relay_stats))
}

fn api_v1_routes(tokens: &Arc<TokenService>) -> Router<AppState> {
    Router::new()
        .nest("/patient", patient_routes(tokens))
        .nest("/doctor", doctor_routes(tokens))
        .nest("/admin", admin_routes(tokens))
        .nest("/payment", payment_routes(tokens))
}

/// Patient routes
fn patient_routes(tokens: &Arc<TokenService>) -> Router<AppState> {
    let public = Router::new()
        .route("/signup", post(patient::sign_up))
        .route("/signup/verify-email", get(patient::verify_email))
        .route("/signin", post(patient::sign_in))
        .route("/logout", post(patient::logout))
        .route("/ws", get(chat::patient_chat));

    let private = Router::new()
        .route("/profile", get(patient::profile).put(patient::update_profile))
        .route("/get-availability", get(appointment::availability))
        .route("/get-appointments", get(appointment::upcoming))
        .route("/get-doctor-availability", get(appointment::doctor_availability))
        .route("/confirm-appointment", post(appointment::confirm))
        .route("/cancel-appointment", post(appointment::cancel))
        .route("/get-prescription", get(patient::prescriptions));

    public.merge(with_role(private, tokens.clone(), Role::Patient))
}

/// Doctor routes
fn doctor_routes(tokens: &Arc<TokenService>) -> Router<AppState> {
    let public = Router::new()
        .route("/signin", post(doctor::sign_in))
        .route("/logout", post(doctor::logout));

    let private = Router::new()
        .route("/profile", get(doctor::profile).put(doctor::update_profile))
        .route("/add-prescription", post(doctor::add_prescription))
        .route("/get-prescription", get(doctor::prescriptions))
        .route("/schedule/confirm", post(doctor::confirm_schedule))
        .route("/video-room-create", post(doctor::create_video_room));

    public.merge(with_role(private, tokens.clone(), Role::Doctor))
}

/// Admin routes
fn admin_routes(tokens: &Arc<TokenService>) -> Router<AppState> {
    let public = Router::new()
        .route("/signin", post(admin::sign_in))
        .route("/logout", post(admin::logout))
        .route("/ws", get(chat::support_chat));

    let private = Router::new()
        .route("/doctor/register", post(admin::register_doctor))
        .route("/doctor/delete/:id", delete(admin::delete_doctor))
        .route("/doctor/list", get(admin::list_doctors))
        .route("/doctor/addcategory", post(admin::add_category))
        .route("/patient/register", post(admin::register_patient))
        .route("/patient/delete/:id", delete(admin::delete_patient))
        .route("/patient/block/:id", post(admin::block_patient))
        .route("/patient/list", get(admin::list_patients))
        .route("/dashboard/fetch", get(admin::dashboard));

    public.merge(with_role(private, tokens.clone(), Role::Admin))
}

/// Payment routes
fn payment_routes(tokens: &Arc<TokenService>) -> Router<AppState> {
    let private = Router::new().route("/order", post(payment::create_order));
    with_role(private, tokens.clone(), Role::Patient)
}
