//! Revocation (blacklist) entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clinic_core::types::{RevocationId, UserId};

/// Default reason recorded for a logout.
pub const REASON_LOGOUT: &str = "logout";

/// A persisted record that a specific token string is no longer trusted.
///
/// The entry is live while `expires_at > now`; after that the token would be
/// rejected on expiry anyway and the row can be purged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevocationEntry {
    /// Row identifier.
    pub id: RevocationId,
    /// The exact revoked token string.
    #[serde(skip_serializing)]
    pub token: String,
    /// The token's own expiry.
    pub expires_at: DateTime<Utc>,
    /// Owner of the revoked token.
    pub user_id: UserId,
    /// Why the token was revoked.
    pub reason: String,
    /// When the revocation was recorded.
    pub created_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Whether the entry still suppresses its token at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Data required to record a revocation.
#[derive(Debug, Clone)]
pub struct NewRevocation {
    /// The exact token string.
    pub token: String,
    /// The token's expiry.
    pub expires_at: DateTime<Utc>,
    /// Owner of the token.
    pub user_id: UserId,
    /// Why the token is revoked.
    pub reason: String,
}

impl NewRevocation {
    /// Revocation for a voluntary logout.
    pub fn logout(token: impl Into<String>, expires_at: DateTime<Utc>, user_id: UserId) -> Self {
        Self {
            token: token.into(),
            expires_at,
            user_id,
            reason: REASON_LOGOUT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_liveness_boundary() {
        let now = Utc::now();
        let entry = RevocationEntry {
            id: RevocationId(1),
            token: "t".to_string(),
            expires_at: now,
            user_id: UserId(1),
            reason: REASON_LOGOUT.to_string(),
            created_at: now - Duration::minutes(5),
        };
        assert!(!entry.is_live_at(now));
        assert!(entry.is_live_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_logout_reason() {
        let rev = NewRevocation::logout("abc", Utc::now(), UserId(9));
        assert_eq!(rev.reason, "logout");
    }
}
