//! Session configuration sourced from the environment.

use std::time::Duration;

use crate::auth::CookiePolicy;
use crate::config::env::RuntimeEnv;
use crate::error::AppError;
use crate::logging::security;
use crate::state::security_config::{SecurityConfig, DEFAULT_ACCESS_TTL, DEFAULT_REFRESH_TTL};

/// Parse `<n>s`, `<n>m`, `<n>h`, `<n>d`, or bare seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, AppError> {
    let raw = raw.trim();
    let invalid = || AppError::config(format!("invalid duration '{raw}'"));

    let (digits, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], c.to_ascii_lowercase()),
        Some(_) => (raw, 's'),
        None => return Err(invalid()),
    };
    let n: u64 = digits.parse().map_err(|_| invalid())?;
    let scale: u64 = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return Err(invalid()),
    };
    // Must also fit a signed unix timestamp once added to `iat`.
    let secs = n
        .checked_mul(scale)
        .filter(|s| *s <= i64::MAX as u64)
        .ok_or_else(|| AppError::config(format!("duration '{raw}' is too large")))?;
    if secs == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(secs))
}

/// Raw session settings before secret resolution.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub access_secret: Option<String>,
    pub refresh_secret: Option<String>,
    pub shared_secret: Option<String>,
    pub access_ttl: Option<Duration>,
    pub refresh_ttl: Option<Duration>,
    pub access_cookie_max_age_ms: Option<u64>,
    pub refresh_cookie_max_age_ms: Option<u64>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let ms = |name: &str| -> Result<Option<u64>, AppError> {
            get(name)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| AppError::config(format!("{name} must be milliseconds")))
                })
                .transpose()
        };

        Ok(Self {
            access_secret: get("JWT_ACCESS_SECRET"),
            refresh_secret: get("JWT_REFRESH_SECRET"),
            shared_secret: get("JWT_SECRET"),
            access_ttl: get("JWT_ACCESS_EXPIRES_IN")
                .map(|v| parse_duration(&v))
                .transpose()?,
            refresh_ttl: get("JWT_REFRESH_EXPIRES_IN")
                .map(|v| parse_duration(&v))
                .transpose()?,
            access_cookie_max_age_ms: ms("COOKIE_ACCESS_TOKEN_MAX_AGE_MS")?,
            refresh_cookie_max_age_ms: ms("COOKIE_REFRESH_TOKEN_MAX_AGE_MS")?,
        })
    }

    /// Resolve per-class secrets. A class without a dedicated secret uses
    /// `JWT_SECRET`; that fallback is logged as a security event.
    pub fn security_config(&self) -> Result<SecurityConfig, AppError> {
        let resolve = |dedicated: &Option<String>, name: &str| {
            dedicated
                .clone()
                .or_else(|| self.shared_secret.clone())
                .ok_or_else(|| AppError::config(format!("{name} or JWT_SECRET must be set")))
        };
        let access = resolve(&self.access_secret, "JWT_ACCESS_SECRET")?;
        let refresh = resolve(&self.refresh_secret, "JWT_REFRESH_SECRET")?;

        if self.access_secret.is_none() || self.refresh_secret.is_none() {
            security::shared_secret_fallback();
        }

        Ok(SecurityConfig::new(access, refresh).with_ttls(
            self.access_ttl.unwrap_or(DEFAULT_ACCESS_TTL),
            self.refresh_ttl.unwrap_or(DEFAULT_REFRESH_TTL),
        ))
    }

    /// Cookie max-age defaults to the credential lifetime of its class.
    pub fn cookie_policy(&self, env: RuntimeEnv) -> CookiePolicy {
        let access = self.access_ttl.unwrap_or(DEFAULT_ACCESS_TTL);
        let refresh = self.refresh_ttl.unwrap_or(DEFAULT_REFRESH_TTL);
        CookiePolicy::new(
            env,
            self.access_cookie_max_age_ms
                .unwrap_or(access.as_millis() as u64),
            self.refresh_cookie_max_age_ms
                .unwrap_or(refresh.as_millis() as u64),
        )
    }
}
