//! Error codes for the API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in Problem Details responses. Clients branch on these, so the strings are
/// part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication (401)
    /// Authentication required
    Unauthorized,
    /// No credential cookie on the request
    UnauthorizedMissingCredential,
    /// Credential failed signature or structural checks
    UnauthorizedInvalidJwt,
    /// Credential is past its expiry instant
    UnauthorizedExpiredJwt,
    /// Credential refers to a subject that no longer exists
    UnauthorizedUserNotFound,

    // Authorization (403)
    /// Access denied
    Forbidden,
    /// Account is suspended
    ForbiddenSuspended,
    /// Subject's role is not in the operation's required set
    InsufficientRole,
    /// Admin bootstrap attempted while an admin already exists
    AdminAlreadyExists,

    // Request Validation
    /// Invalid user id in the path
    InvalidUserId,
    /// Invalid email address
    InvalidEmail,
    /// OAuth state cookie missing or mismatched
    InvalidOauthState,
    /// OAuth callback without an authorization code
    MissingOauthCode,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// `(provider, provider_id)` already bound to a user
    IdentityTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Upstream
    /// External identity provider rejected or failed the exchange
    IdentityProviderError,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Unique constraint violation
    UniqueViolation,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingCredential => "UNAUTHORIZED_MISSING_CREDENTIAL",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedUserNotFound => "UNAUTHORIZED_USER_NOT_FOUND",

            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenSuspended => "FORBIDDEN_SUSPENDED",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",

            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidOauthState => "INVALID_OAUTH_STATE",
            Self::MissingOauthCode => "MISSING_OAUTH_CODE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::IdentityTaken => "IDENTITY_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::IdentityProviderError => "IDENTITY_PROVIDER_ERROR",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
