use std::fmt;
use std::time::Duration;

use crate::auth::CredentialClass;

pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Signing material for one credential class.
#[derive(Clone)]
pub struct ClassKey {
    pub secret: Vec<u8>,
    pub ttl: Duration,
}

impl fmt::Debug for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassKey")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Per-class JWT signing configuration.
///
/// Access and refresh credentials normally use distinct secrets. When they
/// share one (the `JWT_SECRET` fallback), the `token_use` claim is what keeps
/// the classes apart.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    access: ClassKey,
    refresh: ClassKey,
}

impl SecurityConfig {
    pub fn new(access_secret: impl Into<Vec<u8>>, refresh_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            access: ClassKey {
                secret: access_secret.into(),
                ttl: DEFAULT_ACCESS_TTL,
            },
            refresh: ClassKey {
                secret: refresh_secret.into(),
                ttl: DEFAULT_REFRESH_TTL,
            },
        }
    }

    /// Both classes signed with one secret.
    pub fn shared(secret: impl Into<Vec<u8>>) -> Self {
        let secret = secret.into();
        Self::new(secret.clone(), secret)
    }

    pub fn with_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access.ttl = access;
        self.refresh.ttl = refresh;
        self
    }

    pub fn key(&self, class: CredentialClass) -> &ClassKey {
        match class {
            CredentialClass::Access => &self.access,
            CredentialClass::Refresh => &self.refresh,
        }
    }

    pub fn ttl(&self, class: CredentialClass) -> Duration {
        self.key(class).ttl
    }

    pub fn shares_secret(&self) -> bool {
        self.access.secret == self.refresh.secret
    }

    /// Distinct random secrets, default lifetimes.
    pub fn for_tests() -> Self {
        Self::new(
            format!("test-access-{}", uuid::Uuid::new_v4()),
            format!("test-refresh-{}", uuid::Uuid::new_v4()),
        )
    }
}
