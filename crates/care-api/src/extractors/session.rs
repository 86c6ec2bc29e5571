//! Session extractors
//!
//! `Session<R>` yields the verified claims for role `R`. Behind the role guard
//! the claims are taken from the request extensions; anywhere else the cookie
//! is verified on the spot with the same rules.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use care_common::{Claims, Role, TokenService};

use crate::auth::{extract_claims, extract_optional_claims};
use crate::response::ApiError;

/// Type-level role for [`Session`]
pub trait RoleMarker: Send + Sync + 'static {
    const ROLE: Role;
}

#[derive(Debug, Clone, Copy)]
pub struct PatientRole;

#[derive(Debug, Clone, Copy)]
pub struct DoctorRole;

#[derive(Debug, Clone, Copy)]
pub struct AdminRole;

impl RoleMarker for PatientRole {
    const ROLE: Role = Role::Patient;
}

impl RoleMarker for DoctorRole {
    const ROLE: Role = Role::Doctor;
}

impl RoleMarker for AdminRole {
    const ROLE: Role = Role::Admin;
}

/// Authenticated session of role `R`
#[derive(Debug, Clone)]
pub struct Session<R> {
    claims: Claims,
    _role: PhantomData<fn() -> R>,
}

pub type PatientSession = Session<PatientRole>;
pub type DoctorSession = Session<DoctorRole>;
pub type AdminSession = Session<AdminRole>;

impl<R: RoleMarker> Session<R> {
    fn new(claims: Claims) -> Self {
        Self {
            claims,
            _role: PhantomData,
        }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject_id(&self) -> &str {
        self.claims.subject_id()
    }
}

#[async_trait]
impl<S, R> FromRequestParts<S> for Session<R>
where
    S: Send + Sync,
    R: RoleMarker,
    Arc<TokenService>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts
            .extensions
            .get::<Claims>()
            .filter(|claims| claims.role == R::ROLE)
        {
            return Ok(Self::new(claims.clone()));
        }

        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = extract_claims(&parts.headers, &tokens, R::ROLE)?;
        Ok(Self::new(claims))
    }
}

/// Session of role `R` if the request carries that role's cookie
///
/// An absent cookie yields `None`; a present but invalid one is rejected.
#[derive(Debug, Clone)]
pub struct OptionalSession<R>(pub Option<Session<R>>);

impl<R> OptionalSession<R> {
    pub fn subject_id(&self) -> Option<&str> {
        self.0.as_ref().map(|session| session.claims.subject_id())
    }
}

#[async_trait]
impl<S, R> FromRequestParts<S> for OptionalSession<R>
where
    S: Send + Sync,
    R: RoleMarker,
    Arc<TokenService>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = extract_optional_claims(&parts.headers, &tokens, R::ROLE)?;
        Ok(Self(claims.map(Session::new)))
    }
}
