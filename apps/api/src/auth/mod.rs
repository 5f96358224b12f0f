//! Session credentials: codec, cookies, verification and authorization.

pub mod claims;
pub mod cookies;
pub mod google;
pub mod guard;
pub mod jwt;
pub mod session;
pub mod verifier;

use thiserror::Error;

pub use claims::{Claims, CredentialClass, SubjectClaims, SubjectContext};
pub use cookies::{CookieAttributes, CookiePolicy};
pub use guard::{authorize, RequiredRoles};
pub use session::{SessionService, TokenPair};
pub use verifier::{SessionVerifier, VerificationError};

use crate::errors::ErrorCode;
use crate::AppError;

/// Why a request could not be admitted.
///
/// Every variant except `Suspended` and `InsufficientRole` means the caller
/// is not authenticated (401); those two are authenticated but denied (403).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no credential presented")]
    NoCredential,
    #[error("credential signature invalid")]
    InvalidSignature,
    #[error("credential expired")]
    Expired,
    #[error("credential malformed")]
    Malformed,
    #[error("credential of the wrong class")]
    WrongClass,
    #[error("credential subject no longer exists")]
    SubjectNotFound,
    #[error("account suspended")]
    Suspended,
    #[error("role not permitted")]
    InsufficientRole,
}

impl AuthFailure {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthFailure::NoCredential => "no_credential",
            AuthFailure::InvalidSignature => "invalid_signature",
            AuthFailure::Expired => "expired",
            AuthFailure::Malformed => "malformed",
            AuthFailure::WrongClass => "wrong_class",
            AuthFailure::SubjectNotFound => "subject_not_found",
            AuthFailure::Suspended => "suspended",
            AuthFailure::InsufficientRole => "insufficient_role",
        }
    }

    pub const fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthFailure::Suspended | AuthFailure::InsufficientRole)
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::NoCredential => AppError::unauthorized(
                ErrorCode::UnauthorizedMissingCredential,
                "Authentication required",
            ),
            AuthFailure::InvalidSignature | AuthFailure::Malformed | AuthFailure::WrongClass => {
                AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt, "Invalid credential")
            }
            AuthFailure::Expired => {
                AppError::unauthorized(ErrorCode::UnauthorizedExpiredJwt, "Credential expired")
            }
            AuthFailure::SubjectNotFound => {
                AppError::unauthorized(ErrorCode::UnauthorizedUserNotFound, "User not found")
            }
            AuthFailure::Suspended => {
                AppError::forbidden(ErrorCode::ForbiddenSuspended, "Account suspended")
            }
            AuthFailure::InsufficientRole => {
                AppError::forbidden(ErrorCode::InsufficientRole, "Insufficient role")
            }
        }
    }
}
