//! Role guard middleware
//!
//! Wraps a router so that every route requires a valid session of one role.
//! Rejections never reach the wrapped handler; on success the verified
//! [`Claims`] are stored in the request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use care_common::{Claims, Role, TokenService};

use super::extract_claims;
use crate::response::ApiError;

/// Middleware state: which role to require and how to verify it
#[derive(Debug, Clone)]
pub struct RoleGuard {
    tokens: Arc<TokenService>,
    role: Role,
}

impl RoleGuard {
    pub fn new(tokens: Arc<TokenService>, role: Role) -> Self {
        Self { tokens, role }
    }
}

/// Middleware function for [`RoleGuard`]
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_claims(request.headers(), &guard.tokens, guard.role) {
        Ok(claims) => {
            tracing::debug!(
                role = %claims.role,
                subject = %claims.subject_id(),
                path = %request.uri().path(),
                "Session accepted"
            );
            request.extensions_mut().insert::<Claims>(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                required = %guard.role,
                path = %request.uri().path(),
                error = %e,
                "Session rejected"
            );
            ApiError::from(e).into_response()
        }
    }
}

/// Require a session of `role` on every route of `router`
pub fn with_role<S>(router: Router<S>, tokens: Arc<TokenService>, role: Role) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        RoleGuard::new(tokens, role),
        require_role,
    ))
}
