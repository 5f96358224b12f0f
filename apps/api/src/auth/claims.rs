use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Role, User, UserStatus};

/// Which of the two session credentials a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialClass {
    Access,
    Refresh,
}

impl CredentialClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CredentialClass::Access => "access",
            CredentialClass::Refresh => "refresh",
        }
    }

    /// Cookie carrying this credential.
    pub const fn cookie_name(&self) -> &'static str {
        match self {
            CredentialClass::Access => "access_token",
            CredentialClass::Refresh => "refresh_token",
        }
    }
}

/// Identity snapshot embedded in both credentials at issuance.
///
/// `role` and `status` here are informational only; verification always
/// re-reads the live record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectClaims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    /// Unix seconds of the last recorded logout, if any.
    #[serde(default)]
    pub last_logout: Option<i64>,
}

impl From<&User> for SubjectClaims {
    fn from(user: &User) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            last_logout: user.last_logout.map(OffsetDateTime::unix_timestamp),
        }
    }
}

/// Full JWT payload as signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub subject: SubjectClaims,
    pub token_use: CredentialClass,
    /// Per-issuance id so two tokens minted in the same second differ.
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller as seen by handlers. Built from the live directory
/// record, never from token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectContext {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_logout: Option<OffsetDateTime>,
}

impl From<&User> for SubjectContext {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            status: user.status,
            last_logout: user.last_logout,
        }
    }
}
