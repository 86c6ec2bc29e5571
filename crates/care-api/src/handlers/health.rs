//! Health check handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use care_relay::{RelayHub, RelayStats};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Live chat connections per audience and broadcast counters
///
/// GET /health/relay
pub async fn relay_stats(State(relay): State<Arc<RelayHub>>) -> Json<RelayStats> {
    Json(relay.stats())
}
