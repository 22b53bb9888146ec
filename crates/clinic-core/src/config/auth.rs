//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token lifetime used when `jwt_expire` cannot be parsed.
pub const FALLBACK_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Placeholder signing secret shipped in the defaults.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Environments allowed to run with [`DEFAULT_JWT_SECRET`].
const PLACEHOLDER_SECRET_ENVIRONMENTS: &[&str] = &["development", "test"];

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Must be non-empty.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime as a duration string: `24h`, `90m`, `1h30m`, `3600s`.
    #[serde(default = "default_jwt_expire")]
    pub jwt_expire: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expire: default_jwt_expire(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
        }
    }
}

impl AuthConfig {
    /// Refuses an empty signing secret, and the shipped placeholder outside
    /// development and test environments.
    pub fn check_signing_secret(&self, environment: &str) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            if !PLACEHOLDER_SECRET_ENVIRONMENTS.contains(&environment) {
                return Err(AppError::configuration(format!(
                    "auth.jwt_secret is the built-in placeholder; set CLINIC__AUTH__JWT_SECRET \
                     before running the {environment} environment"
                )));
            }
            tracing::warn!(
                environment,
                "auth.jwt_secret is the built-in placeholder; set CLINIC__AUTH__JWT_SECRET"
            );
        }
        Ok(())
    }

    /// Resolved token lifetime.
    ///
    /// A malformed or non-positive `jwt_expire` falls back to 24 hours and
    /// logs a warning.
    pub fn token_ttl(&self) -> Duration {
        match parse_duration(&self.jwt_expire) {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => {
                tracing::warn!(
                    jwt_expire = %self.jwt_expire,
                    fallback_hours = 24,
                    "Invalid token lifetime, using fallback"
                );
                FALLBACK_TOKEN_TTL
            }
        }
    }
}

/// Parse a duration string made of `<number><unit>` groups.
///
/// Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. Numbers may carry a
/// fractional part (`1.5h`). A bare `0` is accepted. Negative values are
/// rejected.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s.is_empty() || s.starts_with('-') {
        return None;
    }
    if s == "0" {
        return Some(Duration::ZERO);
    }

    let mut total_nanos: f64 = 0.0;
    let mut rest = s;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return None;
        }
        let number: f64 = rest[..num_len].parse().ok()?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return None,
        };
        rest = &rest[unit_len..];
        total_nanos += number * nanos_per_unit;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(total_nanos as u64))
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_expire() -> String {
    "24h".to_string()
}

fn default_password_min() -> usize {
    6
}

fn default_password_max() -> usize {
    100
}
