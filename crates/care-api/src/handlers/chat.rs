//! Chat upgrade handlers
//!
//! Patients join as the initiator audience, support staff as the responder
//! audience. Neither route requires a session; a valid cookie only tags the
//! connection with its subject for logging.

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::HeaderMap,
    response::Response,
};
use care_common::{Role, TokenService};
use care_relay::{accept, Audience, RelayHub};

use crate::auth::extract_optional_claims;

/// GET /patient/ws
pub async fn patient_chat(
    State(tokens): State<Arc<TokenService>>,
    State(relay): State<Arc<RelayHub>>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let subject = subject_for(&headers, &tokens, Role::Patient);
    accept(ws, relay, Audience::Patient, subject)
}

/// GET /admin/ws
pub async fn support_chat(
    State(tokens): State<Arc<TokenService>>,
    State(relay): State<Arc<RelayHub>>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let subject = subject_for(&headers, &tokens, Role::Admin);
    accept(ws, relay, Audience::Support, subject)
}

fn subject_for(headers: &HeaderMap, tokens: &TokenService, role: Role) -> Option<String> {
    match extract_optional_claims(headers, tokens, role) {
        Ok(claims) => claims.map(|claims| claims.sub),
        Err(e) => {
            tracing::debug!(%role, error = %e, "Ignoring invalid session on chat upgrade");
            None
        }
    }
}
