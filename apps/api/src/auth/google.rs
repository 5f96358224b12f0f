//! External identity provider handoff (Google OAuth 2.0 authorization code).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::env::opt_var;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::AppError;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Identity asserted by an external provider after a successful handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub provider: String,
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Where to send the browser to start a login; `state` is echoed back.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange the callback's authorization code for an asserted identity.
    async fn exchange(&self, code: &str) -> Result<ExternalIdentity, DomainError>;
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl GoogleConfig {
    /// `None` unless `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET` and
    /// `GOOGLE_CALLBACK_URL` are all set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            client_id: opt_var("GOOGLE_CLIENT_ID")?,
            client_secret: opt_var("GOOGLE_CLIENT_SECRET")?,
            callback_url: opt_var("GOOGLE_CALLBACK_URL")?,
        })
    }
}

pub struct GoogleIdentityProvider {
    http: reqwest::Client,
    config: GoogleConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }
}

fn upstream(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::Upstream, detail)
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.callback_url),
            urlencoding::encode("openid email profile"),
            urlencoding::encode(state),
        )
    }

    async fn exchange(&self, code: &str) -> Result<ExternalIdentity, DomainError> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.callback_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "google token exchange failed");
                upstream("Identity provider rejected the authorization code")
            })?
            .json()
            .await
            .map_err(|_| upstream("Identity provider returned an unreadable token response"))?;

        let info: UserInfo = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "google userinfo request failed");
                upstream("Identity provider userinfo request failed")
            })?
            .json()
            .await
            .map_err(|_| upstream("Identity provider returned unreadable userinfo"))?;

        let email = info
            .email
            .ok_or_else(|| DomainError::validation("Identity provider did not supply an email"))?;
        let name = info.name.unwrap_or_else(|| email.clone());

        Ok(ExternalIdentity {
            provider: "google".to_string(),
            provider_id: info.sub,
            email,
            name,
            picture: info.picture,
        })
    }
}
