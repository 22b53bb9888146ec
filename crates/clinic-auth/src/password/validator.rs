//! Password length policy.

use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;

/// Validates new passwords against the configured length bounds.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Checks the password length in characters.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }
        Ok(())
    }
}
