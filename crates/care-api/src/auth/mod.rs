//! Role-scoped authentication
//!
//! Each role carries its credential in its own cookie (`patienttoken`,
//! `doctortoken`, `admintoken`). [`extract_claims`] is the single decision
//! point; the route guard and the request extractors are both built on it.

mod cookies;
mod guard;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use care_common::{AppError, Claims, Role, TokenService};

pub use cookies::{cleared_session_cookie, session_cookie};
pub use guard::{require_role, with_role, RoleGuard};

/// Authenticate a request for `expected` role
///
/// # Errors
/// - `MissingAuth` when no usable credential is present
/// - `InvalidToken` / `TokenExpired` when the role's cookie fails verification
/// - `WrongRole` when the credential is valid but grants a different role
pub fn extract_claims(
    headers: &HeaderMap,
    tokens: &TokenService,
    expected: Role,
) -> Result<Claims, AppError> {
    let jar = CookieJar::from_headers(headers);

    if let Some(cookie) = jar.get(expected.cookie_name()) {
        let claims = tokens.verify(cookie.value())?;
        return check_role(claims, expected);
    }

    // A valid session of another role means the caller is known but not allowed here
    for other in Role::ALL.into_iter().filter(|role| *role != expected) {
        if let Some(cookie) = jar.get(other.cookie_name()) {
            if let Ok(claims) = tokens.verify(cookie.value()) {
                return Err(AppError::WrongRole {
                    required: expected,
                    actual: claims.role,
                });
            }
        }
    }

    Err(AppError::MissingAuth)
}

/// Like [`extract_claims`], but an absent cookie for `expected` yields `None`
///
/// # Errors
/// Same as [`extract_claims`] once the role's cookie is present
pub fn extract_optional_claims(
    headers: &HeaderMap,
    tokens: &TokenService,
    expected: Role,
) -> Result<Option<Claims>, AppError> {
    let jar = CookieJar::from_headers(headers);

    match jar.get(expected.cookie_name()) {
        Some(cookie) => {
            let claims = tokens.verify(cookie.value())?;
            check_role(claims, expected).map(Some)
        }
        None => Ok(None),
    }
}

fn check_role(claims: Claims, expected: Role) -> Result<Claims, AppError> {
    if claims.role == expected {
        Ok(claims)
    } else {
        Err(AppError::WrongRole {
            required: expected,
            actual: claims.role,
        })
    }
}
