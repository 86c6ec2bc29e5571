//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use care_backend::{BackendClients, Endpoints, HttpRpcTransport};
use care_common::{AppConfig, AppError, TokenService};
use care_relay::{CloseCode, RelayHub};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(state.tokens()).merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create `AppState`
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let tokens = Arc::new(TokenService::new(&config.jwt.secret, config.jwt.ttl_seconds));

    let endpoints = Endpoints {
        user: config.backend.user_endpoint.clone(),
        appointment: config.backend.appointment_endpoint.clone(),
        payment: config.backend.payment_endpoint.clone(),
    };
    let transport = HttpRpcTransport::new(
        endpoints,
        Duration::from_secs(config.backend.timeout_seconds),
    )
    .map_err(AppError::internal)?;
    info!(
        user = %config.backend.user_endpoint,
        appointment = %config.backend.appointment_endpoint,
        payment = %config.backend.payment_endpoint,
        "Backend endpoints configured"
    );

    let backend = BackendClients::new(Arc::new(transport));
    let relay = Arc::new(RelayHub::new(&config.relay));

    Ok(AppState::new(config, tokens, backend, relay))
}

/// Serve `app` on `listener` until `shutdown` resolves
///
/// Chat connections are closed with "going away" once shutdown begins.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    relay: Arc<RelayHub>,
    shutdown: F,
) -> Result<(), AppError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, closing chat connections");
            relay.close_all(CloseCode::GoingAway);
        })
        .await
        .map_err(|e| AppError::internal(anyhow::Error::new(e).context("HTTP server failed")))
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(
    app: Router,
    relay: Arc<RelayHub>,
    addr: SocketAddr,
) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| {
            AppError::internal(anyhow::Error::new(e).context(format!("Failed to bind to {addr}")))
        })?;

    info!("Server listening on http://{}", addr);

    serve(listener, app, relay, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config)?;
    let relay = state.relay().clone();
    let app = create_app(state);

    run_server(app, relay, addr).await
}
