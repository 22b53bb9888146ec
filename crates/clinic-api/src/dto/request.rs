//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use clinic_auth::RegisterUser;
use clinic_core::types::RoleId;
use clinic_service::UpdateUserInput;

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("alphanumeric");
        err.message = Some("Username may only contain letters and digits".into());
        Err(err)
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3 to 50 characters"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,
    /// Email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, max = 100, message = "Password must be 6 to 100 characters"))]
    pub password: String,
    /// Role to assign.
    pub role_id: RoleId,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            role_id: req.role_id,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Partial account update. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    #[validate(
        length(min = 3, max = 50, message = "Username must be 3 to 50 characters"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: Option<String>,
    /// New email.
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    /// New password.
    #[validate(length(min = 6, max = 100, message = "Password must be 6 to 100 characters"))]
    pub password: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            role_id: req.role_id,
        }
    }
}
