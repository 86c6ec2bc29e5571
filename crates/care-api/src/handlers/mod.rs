//! Route handlers
//!
//! Handlers translate gateway requests into backend calls and pass the reply
//! through. Identity always comes from the session, never from the body.

pub mod admin;
pub mod appointment;
pub mod chat;
pub mod doctor;
pub mod health;
pub mod patient;
pub mod payment;

use axum_extra::extract::CookieJar;
use care_common::Role;

use crate::auth::cleared_session_cookie;
use crate::response::Acknowledged;

/// Clear the session cookie of `role`
///
/// Tokens are not revoked server-side; the client just forgets its cookie.
pub(crate) fn logout(jar: CookieJar, role: Role) -> (CookieJar, Acknowledged) {
    tracing::debug!(%role, "Session cookie cleared");
    let message = format!("{} logged out successfully", capitalized(role));
    (jar.add(cleared_session_cookie(role)), Acknowledged(message))
}

fn capitalized(role: Role) -> String {
    let name = role.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
