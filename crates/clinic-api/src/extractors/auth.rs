//! `AuthUser` and `BearerToken` extractors over the gateway's request extensions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use clinic_auth::Identity;
use clinic_core::error::AppError;

/// The authenticated caller, as validated by the auth gateway.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Returns the inner `Identity`.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::authentication("No authenticated identity on request"))
    }
}

/// The raw bearer token the caller presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// The token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or_else(|| AppError::authentication("No bearer token on request"))
    }
}
