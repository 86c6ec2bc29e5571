//! Role-scoped session tokens
//!
//! Tokens are HS256 JWTs carrying a subject, a single role and an expiry.
//! Verification is fully offline: signature, structure and expiry are the only
//! inputs, so any gateway instance sharing the secret accepts the same tokens.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Clock, Role, SystemClock};
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (patient, doctor or admin identifier, opaque to the gateway)
    pub sub: String,
    /// The single role this token grants
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Subject identifier
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.sub
    }

    /// Check if the token is expired at the given Unix timestamp
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}

/// Issues and verifies session tokens with a process-wide signing key
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service reading wall-clock time
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self::with_clock(secret, ttl_seconds, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit time source
    #[must_use]
    pub fn with_clock(secret: &str, ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against `clock`, not the library's own wall clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::try_seconds(ttl_seconds).unwrap_or(Duration::MAX),
            clock,
        }
    }

    /// Token lifetime in seconds
    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a token for a subject with a role
    ///
    /// # Errors
    /// Returns an internal error if the expiry is out of range or signing fails
    pub fn issue(&self, subject_id: &str, role: Role) -> Result<String, AppError> {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Session expiry overflows with a TTL of {}s",
                self.ttl.num_seconds()
            ))
        })?;

        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign session token: {e}")))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// Returns `InvalidToken` if the signature or structure is bad, and
    /// `TokenExpired` once the current time is past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AppError::InvalidToken
            })?;

        let claims = token_data.claims;
        if claims.is_expired_at(self.clock.now().timestamp()) {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}
