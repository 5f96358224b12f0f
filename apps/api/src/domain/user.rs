//! Subject (user account) domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, UserStatus::Suspended)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "suspended" => Ok(UserStatus::Suspended),
            other => Err(DomainError::validation(format!("unknown status '{other}'"))),
        }
    }
}

/// A user account as held by the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub provider: String,
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_logout: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Input for creating a user; role and status default to user/active.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub provider: String,
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub role: Role,
    pub status: UserStatus,
}

impl NewUser {
    pub fn new(
        provider: impl Into<String>,
        provider_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            provider_id: provider_id.into(),
            email: email.into(),
            name: name.into(),
            picture: None,
            role: Role::User,
            status: UserStatus::Active,
        }
    }

    pub fn with_picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Materialize as a fresh record with no login history.
    pub fn into_user(self, id: Uuid, now: OffsetDateTime) -> User {
        User {
            id,
            provider: self.provider,
            provider_id: self.provider_id,
            email: self.email,
            name: self.name,
            picture: self.picture,
            role: self.role,
            status: self.status,
            last_login: None,
            last_logout: None,
            created_at: now,
            updated_at: now,
        }
    }
}
