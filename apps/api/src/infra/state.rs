use std::sync::Arc;

use tracing::info;

use crate::auth::google::{GoogleConfig, GoogleIdentityProvider, IdentityProvider};
use crate::auth::CookiePolicy;
use crate::config::env::RuntimeEnv;
use crate::directory::{InMemoryUserDirectory, SeaUserDirectory, UserDirectory};
use crate::error::AppError;
use crate::infra::db::connect_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: SecurityConfig,
    cookies: Option<CookiePolicy>,
    env: RuntimeEnv,
    directory: Option<Arc<dyn UserDirectory>>,
    database_url: Option<String>,
    identity: Option<Arc<dyn IdentityProvider>>,
    google: Option<GoogleConfig>,
    frontend_url: String,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: SecurityConfig::for_tests(),
            cookies: None,
            env: RuntimeEnv::Test,
            directory: None,
            database_url: None,
            identity: None,
            google: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    /// Defaults to `CookiePolicy::with_defaults` for the builder's env.
    pub fn with_cookie_policy(mut self, cookies: CookiePolicy) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub fn with_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Back the directory with a database; ignored if a directory was given.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(provider);
        self
    }

    pub fn with_google(mut self, config: GoogleConfig) -> Self {
        self.google = Some(config);
        self
    }

    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let directory: Arc<dyn UserDirectory> = match (self.directory, self.database_url) {
            (Some(directory), _) => directory,
            (None, Some(url)) => Arc::new(SeaUserDirectory::new(connect_db(&url).await?)),
            (None, None) => {
                info!("no database configured; using in-memory user directory");
                Arc::new(InMemoryUserDirectory::new())
            }
        };

        let identity = match (self.identity, self.google) {
            (Some(provider), _) => Some(provider),
            (None, Some(config)) => {
                Some(Arc::new(GoogleIdentityProvider::new(config)?) as Arc<dyn IdentityProvider>)
            }
            (None, None) => None,
        };

        Ok(AppState {
            security: self.security,
            cookies: self
                .cookies
                .unwrap_or_else(|| CookiePolicy::with_defaults(self.env)),
            directory,
            identity,
            frontend_url: self.frontend_url,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
