use std::fmt;
use std::sync::Arc;

use crate::auth::google::IdentityProvider;
use crate::auth::CookiePolicy;
use crate::directory::UserDirectory;
use crate::state::security_config::SecurityConfig;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub security: SecurityConfig,
    pub cookies: CookiePolicy,
    pub directory: Arc<dyn UserDirectory>,
    /// `None` when external login is not configured.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// Browser landing origin; login redirects go to `{frontend_url}/dashboard`.
    pub frontend_url: String,
}

impl AppState {
    pub fn landing_url(&self) -> String {
        format!("{}/dashboard", self.frontend_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("cookies", &self.cookies)
            .field("identity", &self.identity.is_some())
            .field("frontend_url", &self.frontend_url)
            .finish_non_exhaustive()
    }
}
