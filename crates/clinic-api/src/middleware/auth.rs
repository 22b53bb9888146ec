//! Bearer-token gateway applied in front of every non-public route.
//!
//! On success the validated [`Identity`](clinic_auth::Identity) and the raw
//! token are stored in request extensions for the
//! [`AuthUser`](crate::extractors::AuthUser) and
//! [`BearerToken`](crate::extractors::BearerToken) extractors. Every failure
//! produces the same generic 401 so callers cannot tell the reasons apart.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use clinic_core::error::AppError;

use crate::extractors::BearerToken;
use crate::state::AppState;

/// Paths reachable without a token. A path matches when it equals an entry
/// or lies beneath it.
pub const PUBLIC_PATHS: [&str; 4] = ["/api/auth/login", "/api/auth/register", "/api/health", "/health"];

/// Whether `path` is on the public allow-list.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The value must split into exactly two space-separated parts with the
/// scheme `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

/// Rejects requests without a valid, unrevoked token for an existing user.
pub async fn auth_gateway(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_public_path(&path) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(request.headers()) else {
        warn!(path = %path, "Rejected request: missing or malformed Authorization header");
        return unauthorized();
    };

    match state.auth_service.authenticate(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            request.extensions_mut().insert(BearerToken(token));
            next.run(request).await
        }
        Err(rejection) if rejection.is_internal() => {
            error!(path = %path, error = %rejection, "Token validation failed");
            unauthorized()
        }
        Err(rejection) => {
            warn!(path = %path, reason = rejection.reason(), "Rejected request: invalid token");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    AppError::authentication("Unauthorized").into_response()
}
