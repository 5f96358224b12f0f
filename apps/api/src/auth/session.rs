use std::time::SystemTime;

use actix_web::cookie::Cookie;
use actix_web::http::header::HeaderMap;
use actix_web::HttpResponseBuilder;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::claims::CredentialClass;
use super::cookies::CookiePolicy;
use super::google::ExternalIdentity;
use super::jwt::{mint_credential, IssuedCredential};
use super::verifier::SessionVerifier;
use super::AuthFailure;
use crate::directory::UserDirectory;
use crate::domain::User;
use crate::logging::security;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access and refresh credentials issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedCredential,
    pub refresh: IssuedCredential,
}

/// Login, rotation and logout over the directory and the credential codec.
pub struct SessionService<'a> {
    security: &'a SecurityConfig,
    cookies: &'a CookiePolicy,
    directory: &'a dyn UserDirectory,
}

impl<'a> SessionService<'a> {
    pub fn new(
        security: &'a SecurityConfig,
        cookies: &'a CookiePolicy,
        directory: &'a dyn UserDirectory,
    ) -> Self {
        Self {
            security,
            cookies,
            directory,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(&state.security, &state.cookies, state.directory.as_ref())
    }

    pub fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        self.issue_tokens_at(user, SystemTime::now())
    }

    /// Both credentials are built from `user` as given; callers pass the
    /// live record.
    pub fn issue_tokens_at(&self, user: &User, now: SystemTime) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access: mint_credential(user, CredentialClass::Access, now, self.security)?,
            refresh: mint_credential(user, CredentialClass::Refresh, now, self.security)?,
        })
    }

    pub async fn record_login(&self, user_id: Uuid) -> Result<(), AppError> {
        self.directory
            .update_last_login(user_id, OffsetDateTime::now_utc())
            .await?;
        Ok(())
    }

    pub async fn record_logout(&self, user_id: Uuid) -> Result<(), AppError> {
        self.directory
            .update_last_logout(user_id, OffsetDateTime::now_utc())
            .await?;
        Ok(())
    }

    /// Complete a login for an asserted external identity.
    ///
    /// The subject is created on first sight. Suspended accounts are refused
    /// here rather than handed credentials every verifier would reject.
    pub async fn login(&self, identity: ExternalIdentity) -> Result<(User, TokenPair), AppError> {
        let user = ensure_user(self.directory, identity).await?;

        if user.status.is_suspended() {
            security::login_failed("account_suspended", Some(&user.email));
            return Err(AuthFailure::Suspended.into());
        }

        let pair = self.issue_tokens(&user)?;
        self.record_login(user.id).await?;
        security::login_succeeded(user.id, &user.provider);

        Ok((user, pair))
    }

    /// Rotate: verify the refresh cookie, then issue a brand-new pair from
    /// the freshly resolved record. The presented refresh credential stays
    /// valid until its own expiry.
    pub async fn refresh(&self, headers: &HeaderMap) -> Result<TokenPair, AppError> {
        self.refresh_at(headers, SystemTime::now()).await
    }

    pub async fn refresh_at(
        &self,
        headers: &HeaderMap,
        now: SystemTime,
    ) -> Result<TokenPair, AppError> {
        let user = SessionVerifier::refresh(self.security, self.directory)
            .resolve_at(headers, now)
            .await?;
        self.rotate_at(&user, now)
    }

    /// Issue a fresh pair for a subject whose refresh credential was
    /// already verified.
    pub fn rotate(&self, user: &User) -> Result<TokenPair, AppError> {
        self.rotate_at(user, SystemTime::now())
    }

    fn rotate_at(&self, user: &User, now: SystemTime) -> Result<TokenPair, AppError> {
        let pair = self.issue_tokens_at(user, now)?;
        debug!(user_id = %user.id, "session rotated");
        Ok(pair)
    }

    /// Record the logout and return removal cookies for both credentials.
    pub async fn logout(&self, user_id: Uuid) -> Result<[Cookie<'static>; 2], AppError> {
        self.record_logout(user_id).await?;
        info!(%user_id, "user logged out");
        Ok(self.removal_cookies())
    }

    pub fn session_cookies(&self, pair: &TokenPair) -> [Cookie<'static>; 2] {
        [
            self.cookies
                .session_cookie(CredentialClass::Access, pair.access.token.clone()),
            self.cookies
                .session_cookie(CredentialClass::Refresh, pair.refresh.token.clone()),
        ]
    }

    pub fn removal_cookies(&self) -> [Cookie<'static>; 2] {
        [
            self.cookies.removal_cookie(CredentialClass::Access),
            self.cookies.removal_cookie(CredentialClass::Refresh),
        ]
    }
}

/// Attach `cookies` to a response under construction.
pub fn with_cookies<'b>(
    builder: &'b mut HttpResponseBuilder,
    cookies: [Cookie<'static>; 2],
) -> &'b mut HttpResponseBuilder {
    for cookie in cookies {
        builder.cookie(cookie);
    }
    builder
}
