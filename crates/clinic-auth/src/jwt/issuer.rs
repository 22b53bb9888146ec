//! JWT token creation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::UserId;

use super::claims::Claims;

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The compact JWT string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Creates HS256-signed access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    has_secret: bool,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("has_secret", &self.has_secret)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_secret(&config.jwt_secret, config.token_ttl())
    }

    /// Creates an issuer from a raw secret and default lifetime.
    pub fn with_secret(secret: &str, default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            has_secret: !secret.is_empty(),
            default_ttl,
        }
    }

    /// Configured token lifetime.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs a token for the given user with `iat = nbf = now` and
    /// `exp = now + ttl`.
    pub fn issue(
        &self,
        user_id: UserId,
        username: &str,
        role: &str,
        ttl: Duration,
    ) -> AppResult<IssuedToken> {
        if !self.has_secret {
            return Err(AppError::internal("Token signing secret is not configured"));
        }

        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::internal(format!("Token lifetime out of range: {e}")))?;
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: user_id.into_inner(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
