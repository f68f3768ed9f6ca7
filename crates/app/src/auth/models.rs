//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Admin user identifier.
pub type AdminUserUuid = TypedUuid<AdminUser>;

/// Role carried by an admin user and their session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else if value.eq_ignore_ascii_case("viewer") {
            Ok(Self::Viewer)
        } else {
            Err(UnknownRoleError(value.to_string()))
        }
    }
}

/// Persisted admin user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub uuid: AdminUserUuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: Timestamp,
}

/// Admin user creation request, password still in the clear.
#[derive(Clone)]
pub struct NewAdminUser {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for NewAdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAdminUser")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Admin user persistence payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminUserRecord {
    pub uuid: AdminUserUuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Login credentials.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
