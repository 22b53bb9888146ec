//! Signed bearer token issuance and validation.

pub mod claims;
pub mod issuer;
pub mod rejection;
pub mod validator;

pub use claims::Claims;
pub use issuer::{IssuedToken, TokenIssuer};
pub use rejection::TokenRejection;
pub use validator::TokenValidator;
