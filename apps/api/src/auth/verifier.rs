use std::time::SystemTime;

use actix_web::http::header::HeaderMap;
use thiserror::Error;

use super::claims::{CredentialClass, SubjectContext};
use super::cookies::extract_credential;
use super::jwt::verify_credential;
use super::AuthFailure;
use crate::directory::UserDirectory;
use crate::domain::User;
use crate::errors::domain::DomainError;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Auth(#[from] AuthFailure),
    /// The directory could not be consulted; not the caller's fault.
    #[error(transparent)]
    Directory(#[from] DomainError),
}

impl VerificationError {
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            VerificationError::Auth(failure) => Some(*failure),
            VerificationError::Directory(_) => None,
        }
    }
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Auth(failure) => failure.into(),
            VerificationError::Directory(e) => e.into(),
        }
    }
}

/// Turns the session cookie of one credential class into a live subject.
///
/// The same pipeline serves both classes; only the cookie name and signing
/// secret differ. Role and status always come from the directory, never from
/// the token, so suspensions and role changes apply to credentials already
/// in circulation.
pub struct SessionVerifier<'a> {
    class: CredentialClass,
    security: &'a SecurityConfig,
    directory: &'a dyn UserDirectory,
}

impl<'a> SessionVerifier<'a> {
    pub fn access(security: &'a SecurityConfig, directory: &'a dyn UserDirectory) -> Self {
        Self {
            class: CredentialClass::Access,
            security,
            directory,
        }
    }

    pub fn refresh(security: &'a SecurityConfig, directory: &'a dyn UserDirectory) -> Self {
        Self {
            class: CredentialClass::Refresh,
            security,
            directory,
        }
    }

    pub fn class(&self) -> CredentialClass {
        self.class
    }

    pub async fn verify(&self, headers: &HeaderMap) -> Result<SubjectContext, VerificationError> {
        self.resolve_at(headers, SystemTime::now())
            .await
            .map(|user| SubjectContext::from(&user))
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<User, VerificationError> {
        self.resolve_at(headers, SystemTime::now()).await
    }

    /// Resolve the live user behind the request's credential as of `now`.
    pub async fn resolve_at(
        &self,
        headers: &HeaderMap,
        now: SystemTime,
    ) -> Result<User, VerificationError> {
        let result = self.resolve_inner(headers, now).await;
        if let Err(VerificationError::Auth(failure)) = &result {
            security::credential_rejected(self.class, *failure);
        }
        result
    }

    async fn resolve_inner(
        &self,
        headers: &HeaderMap,
        now: SystemTime,
    ) -> Result<User, VerificationError> {
        let token = extract_credential(headers, self.class).ok_or(AuthFailure::NoCredential)?;
        let claims = verify_credential(&token, self.class, now, self.security)?;

        let user = self
            .directory
            .find_by_id(claims.subject.sub)
            .await?
            .ok_or(AuthFailure::SubjectNotFound)?;

        if user.status.is_suspended() {
            security::suspended_access(user.id, self.class);
            return Err(AuthFailure::Suspended.into());
        }

        Ok(user)
    }
}
