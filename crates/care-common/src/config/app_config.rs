//! Application configuration structs
//!
//! Loads configuration from environment variables (and `.env` when present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub backend: BackendConfig,
    pub cors: CorsConfig,
    pub relay: RelayConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_token_ttl")]
    pub ttl_seconds: i64,
}

/// Backend RPC endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Identity service (patients, doctors, admins)
    pub user_endpoint: String,
    /// Scheduling service
    pub appointment_endpoint: String,
    /// Billing service
    pub payment_endpoint: String,
    #[serde(default = "default_rpc_timeout")]
    pub timeout_seconds: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Chat relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Outbound messages queued per connection before it counts as stalled
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

/// Shortest signing secret accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest session lifetime accepted (one year)
const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

// Default value functions
fn default_app_name() -> String {
    "care-gateway".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_token_ttl() -> i64 {
    7200 // 2 hours
}

fn default_rpc_timeout() -> u64 {
    10
}

fn default_outbound_buffer() -> usize {
    64
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// `APP_ENV` is optional, but a value that names no environment is an error
fn environment_from(raw: Option<String>) -> Result<Environment, ConfigError> {
    match raw {
        None => Ok(default_env()),
        Some(raw) => {
            Environment::parse(raw.trim()).ok_or(ConfigError::InvalidValue("APP_ENV", raw))
        }
    }
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env = environment_from(env::var("APP_ENV").ok())?;

        let port_raw = required("SERVER_PORT")?;
        let port = port_raw
            .trim()
            .trim_start_matches(':')
            .parse()
            .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port_raw.clone()))?;

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env,
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                ttl_seconds: parsed_or("JWT_TTL_SECONDS", default_token_ttl())?,
            },
            backend: BackendConfig {
                user_endpoint: required("USER_RPC_ENDPOINT")?,
                appointment_endpoint: required("APPOINTMENT_RPC_ENDPOINT")?,
                payment_endpoint: required("PAYMENT_RPC_ENDPOINT")?,
                timeout_seconds: parsed_or("RPC_TIMEOUT_SECONDS", default_rpc_timeout())?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            relay: RelayConfig {
                outbound_buffer: parsed_or("CHAT_OUTBOUND_BUFFER", default_outbound_buffer())?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns an error describing the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&self.jwt.ttl_seconds) {
            return Err(ConfigError::InvalidValue(
                "JWT_TTL_SECONDS",
                self.jwt.ttl_seconds.to_string(),
            ));
        }

        if self.app.env.is_production() && self.jwt.secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_PRODUCTION_SECRET_LEN} bytes in production"),
            ));
        }

        if self.relay.outbound_buffer == 0 {
            return Err(ConfigError::InvalidValue(
                "CHAT_OUTBOUND_BUFFER",
                "0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
