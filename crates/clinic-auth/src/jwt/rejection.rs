//! Reasons a presented token is not trusted.

use thiserror::Error;

use clinic_core::error::AppError;

/// Why token validation failed.
///
/// The variants stay distinct for logging; at the HTTP boundary all but
/// `Internal` collapse into one generic 401.
#[derive(Debug, Error)]
pub enum TokenRejection {
    /// A live revocation entry exists for this exact token.
    #[error("Token has been revoked")]
    Revoked,
    /// Bad signature, bad encoding, expired, or not yet valid.
    #[error("Token is invalid or expired")]
    Malformed,
    /// The subject no longer exists in the credential store.
    #[error("Token subject no longer exists")]
    UserGone,
    /// A store failed while checking the token.
    #[error(transparent)]
    Internal(AppError),
}

impl TokenRejection {
    /// Whether this rejection came from an infrastructure failure.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Short machine-readable reason for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Revoked => "revoked",
            Self::Malformed => "malformed",
            Self::UserGone => "user_gone",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<TokenRejection> for AppError {
    fn from(rejection: TokenRejection) -> Self {
        match rejection {
            TokenRejection::Internal(e) => e,
            other => AppError::authentication(other.to_string()),
        }
    }
}
