//! # care-common
//!
//! Shared utilities: configuration, error handling, role-scoped session tokens
//! and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, Clock, ManualClock, ParseRoleError, Role, SystemClock, TokenService};
pub use config::{
    AppConfig, AppSettings, BackendConfig, ConfigError, CorsConfig, Environment, JwtConfig,
    RelayConfig, ServerConfig,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
