//! Newtype wrappers around `i64` for domain entity identifiers.
//!
//! Distinct types prevent passing a `RoleId` where a `UserId` is expected.
//! With the `sqlx` feature enabled each ID is a transparent PostgreSQL
//! `BIGINT`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around a `BIGSERIAL` key.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw key.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user account.
    UserId
);

define_id!(
    /// Unique identifier for a role.
    RoleId
);

define_id!(
    /// Unique identifier for a revocation entry.
    RevocationId
);
