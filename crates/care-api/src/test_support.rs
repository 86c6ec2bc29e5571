//! Shared fixtures for router tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use care_backend::{BackendClients, InMemoryTransport};
use care_common::{
    AppConfig, AppSettings, BackendConfig, CorsConfig, Environment, JwtConfig, ManualClock,
    RelayConfig, Role, ServerConfig, TokenService,
};
use care_relay::RelayHub;
use serde_json::Value;

use crate::state::AppState;

pub const SECRET: &str = "router-test-secret-that-is-long-enough";
pub const TTL_SECONDS: i64 = 7200;

pub fn config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "care-gateway-test".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            ttl_seconds: TTL_SECONDS,
        },
        backend: BackendConfig {
            user_endpoint: "http://users.invalid".to_string(),
            appointment_endpoint: "http://appointments.invalid".to_string(),
            payment_endpoint: "http://billing.invalid".to_string(),
            timeout_seconds: 1,
        },
        cors: CorsConfig::default(),
        relay: RelayConfig::default(),
    }
}

/// State over a backend that answers nothing
pub fn state() -> AppState {
    Harness::new(InMemoryTransport::new()).state
}

/// State plus handles on the fake backend and the token clock
pub struct Harness {
    pub state: AppState,
    pub transport: Arc<InMemoryTransport>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(transport: InMemoryTransport) -> Self {
        let transport = Arc::new(transport);
        let clock = Arc::new(ManualClock::default());
        let tokens = Arc::new(TokenService::with_clock(SECRET, TTL_SECONDS, clock.clone()));
        let backend = BackendClients::new(transport.clone());
        let relay = Arc::new(RelayHub::default());

        Self {
            state: AppState::new(config(), tokens, backend, relay),
            transport,
            clock,
        }
    }

    /// A `Cookie` header value carrying a session for `subject`
    pub fn cookie(&self, role: Role, subject: &str) -> String {
        let token = self.state.tokens().issue(subject, role).unwrap();
        format!("{}={token}", role.cookie_name())
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
