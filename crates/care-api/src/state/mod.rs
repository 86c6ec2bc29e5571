//! Application state
//!
//! Everything handlers share: the token service, backend clients, the chat
//! relay and configuration. All fields are cheap to clone.

use std::sync::Arc;

use axum::extract::FromRef;
use care_backend::BackendClients;
use care_common::{AppConfig, TokenService};
use care_relay::RelayHub;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    tokens: Arc<TokenService>,
    backend: BackendClients,
    relay: Arc<RelayHub>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        tokens: Arc<TokenService>,
        backend: BackendClients,
        relay: Arc<RelayHub>,
    ) -> Self {
        Self {
            tokens,
            backend,
            relay,
            config: Arc::new(config),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    pub fn backend(&self) -> &BackendClients {
        &self.backend
    }

    pub fn relay(&self) -> &Arc<RelayHub> {
        &self.relay
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<RelayHub> {
    fn from_ref(state: &AppState) -> Self {
        state.relay.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("relay", &self.relay.stats())
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
