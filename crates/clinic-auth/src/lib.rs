//! # clinic-auth
//!
//! Authentication and authorization core for the SIM Clinic backend.
//!
//! ## Modules
//!
//! - `jwt`: signed token issuance, validation, and rejection reasons
//! - `rbac`: the fixed role hierarchy and the permission evaluator
//! - `password`: Argon2id hashing and password length policy
//! - `revocation`: purge of dead revocation entries
//! - `service`: register, login, logout, and authenticate flows

pub mod identity;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod revocation;
pub mod service;

pub use identity::Identity;
pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenRejection, TokenValidator};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{PermissionEvaluator, ROLE_HIERARCHY};
pub use revocation::RevocationCleanup;
pub use service::{AuthService, LoginResult, RegisterUser};
