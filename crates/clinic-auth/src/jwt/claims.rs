//! JWT claims structure embedded in every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinic_core::types::UserId;

/// JWT claims payload.
///
/// `role` records the role at issue time for clients; authorization never
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: i64,
    /// Username at issue time.
    pub username: String,
    /// Role name at issue time.
    pub role: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Not-before timestamp (seconds since epoch).
    pub nbf: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID, unique per issue so revocation never matches a later token.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId(self.sub)
    }

    /// Returns the expiration as a `DateTime<Utc>`, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
