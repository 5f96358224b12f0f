//! Session cookie policy and extraction.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{HeaderMap, COOKIE};

use super::claims::CredentialClass;
use crate::config::env::RuntimeEnv;
use crate::state::security_config::{DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL};

/// The refresh cookie is only sent to the refresh endpoint.
pub const REFRESH_COOKIE_PATH: &str = "/auth/refresh";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";
pub const OAUTH_STATE_PATH: &str = "/auth/google";
pub const OAUTH_STATE_MAX_AGE_MS: u64 = 10 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieAttributes {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: &'static str,
    pub max_age_ms: u64,
}

/// Attributes for a credential cookie. Production requires HTTPS and allows
/// cross-site delivery (frontend and API on different origins); elsewhere
/// plain HTTP and `Lax`.
pub fn attributes_for(class: CredentialClass, env: RuntimeEnv, max_age_ms: u64) -> CookieAttributes {
    let production = env.is_production();
    CookieAttributes {
        http_only: true,
        secure: production,
        same_site: if production {
            SameSite::None
        } else {
            SameSite::Lax
        },
        path: match class {
            CredentialClass::Access => "/",
            CredentialClass::Refresh => REFRESH_COOKIE_PATH,
        },
        max_age_ms,
    }
}

#[derive(Debug, Clone)]
pub struct CookiePolicy {
    env: RuntimeEnv,
    access_max_age_ms: u64,
    refresh_max_age_ms: u64,
}

impl CookiePolicy {
    pub fn new(env: RuntimeEnv, access_max_age_ms: u64, refresh_max_age_ms: u64) -> Self {
        Self {
            env,
            access_max_age_ms,
            refresh_max_age_ms,
        }
    }

    /// Cookie lifetimes matching the default credential lifetimes.
    pub fn with_defaults(env: RuntimeEnv) -> Self {
        Self::new(
            env,
            DEFAULT_ACCESS_TTL.as_millis() as u64,
            DEFAULT_REFRESH_TTL.as_millis() as u64,
        )
    }

    pub fn env(&self) -> RuntimeEnv {
        self.env
    }

    pub fn attributes(&self, class: CredentialClass) -> CookieAttributes {
        let max_age_ms = match class {
            CredentialClass::Access => self.access_max_age_ms,
            CredentialClass::Refresh => self.refresh_max_age_ms,
        };
        attributes_for(class, self.env, max_age_ms)
    }

    /// `Set-Cookie` carrying `token` as a `class` credential.
    pub fn session_cookie(&self, class: CredentialClass, token: String) -> Cookie<'static> {
        let attrs = self.attributes(class);
        build(class.cookie_name(), token, &attrs)
    }

    /// Removal cookie for `class`. Path must match or the browser keeps it.
    pub fn removal_cookie(&self, class: CredentialClass) -> Cookie<'static> {
        let attrs = self.attributes(class);
        let mut cookie = build(class.cookie_name(), String::new(), &attrs);
        cookie.make_removal();
        cookie
    }

    /// Short-lived login CSRF nonce. Always `Lax` so it survives the
    /// top-level redirect back from the identity provider.
    pub fn oauth_state_cookie(&self, state: String) -> Cookie<'static> {
        let attrs = CookieAttributes {
            http_only: true,
            secure: self.env.is_production(),
            same_site: SameSite::Lax,
            path: OAUTH_STATE_PATH,
            max_age_ms: OAUTH_STATE_MAX_AGE_MS,
        };
        build(OAUTH_STATE_COOKIE, state, &attrs)
    }

    pub fn oauth_state_removal(&self) -> Cookie<'static> {
        let mut cookie = self.oauth_state_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

fn build(name: &'static str, value: String, attrs: &CookieAttributes) -> Cookie<'static> {
    Cookie::build(name, value)
        .http_only(attrs.http_only)
        .secure(attrs.secure)
        .same_site(attrs.same_site)
        .path(attrs.path)
        .max_age(CookieDuration::milliseconds(attrs.max_age_ms as i64))
        .finish()
}

/// Find the value of cookie `name` in the request's `Cookie` header(s).
///
/// Pairs are `;`-separated and whitespace-trimmed; the first pair whose name
/// matches exactly wins. Empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn extract_credential(headers: &HeaderMap, class: CredentialClass) -> Option<String> {
    extract_cookie(headers, class.cookie_name())
}
