//! JWT token validation against the revocation and credential stores.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use clinic_core::config::AuthConfig;
use clinic_database::store::{CredentialStore, RevocationStore};

use super::claims::Claims;
use super::rejection::TokenRejection;
use crate::identity::Identity;

/// Decides whether a presented token is trustworthy and whose it is.
///
/// Validation runs three checks in order: the revocation store, the
/// signature and time window, then re-resolution of the subject. A logout
/// that lands after the revocation check of an in-flight validation does not
/// affect that validation; only later validations see the new entry.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: Arc<dyn RevocationStore>,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    /// Creates a validator from auth configuration.
    pub fn new(
        config: &AuthConfig,
        revocations: Arc<dyn RevocationStore>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self::with_secret(&config.jwt_secret, revocations, credentials)
    }

    /// Creates a validator from a raw secret.
    pub fn with_secret(
        secret: &str,
        revocations: Arc<dyn RevocationStore>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "iat"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            revocations,
            credentials,
        }
    }

    /// Validates a token and resolves the caller's current identity.
    pub async fn validate(&self, token: &str) -> Result<Identity, TokenRejection> {
        let revoked = self
            .revocations
            .is_revoked(token)
            .await
            .map_err(TokenRejection::Internal)?;
        if revoked {
            return Err(TokenRejection::Revoked);
        }

        let claims = self.decode_claims(token)?;

        let user = self
            .credentials
            .find_by_id(claims.user_id())
            .await
            .map_err(TokenRejection::Internal)?
            .ok_or(TokenRejection::UserGone)?;

        Ok(Identity::from(&user))
    }

    /// Verifies signature and time window only, returning the claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenRejection> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "Token failed verification");
                TokenRejection::Malformed
            })
    }
}
