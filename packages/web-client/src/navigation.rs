//! Page-level access rules and the login redirect.

use parking_lot::Mutex;
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const AUTH_PREFIX: &str = "/auth";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

/// Decide a page navigation from the path and whether an access cookie is
/// present. The cookie's validity is the API's business, not the guard's.
pub fn guard(path: &str, has_access_cookie: bool) -> Navigation {
    let on_login = path.starts_with(LOGIN_PATH);
    let on_auth = path.starts_with(AUTH_PREFIX);

    if !has_access_cookie && !on_login && !on_auth {
        return Navigation::Redirect(LOGIN_PATH);
    }
    if has_access_cookie && on_login {
        return Navigation::Redirect(DASHBOARD_PATH);
    }
    Navigation::Proceed
}

/// Where the coordinator sends the user when the session cannot be kept.
pub trait LoginRedirect: Send + Sync {
    fn current_path(&self) -> String;

    /// Replace the current location without adding a history entry.
    fn replace(&self, path: &str);

    fn to_login(&self) {
        if self.current_path() == LOGIN_PATH {
            return;
        }
        debug!(from = %self.current_path(), "redirecting to login");
        self.replace(LOGIN_PATH);
    }
}

/// Navigator without a browser: tracks the location and every redirect.
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    path: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl HeadlessNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }
}

impl LoginRedirect for HeadlessNavigator {
    fn current_path(&self) -> String {
        self.path.lock().clone()
    }

    fn replace(&self, path: &str) {
        *self.path.lock() = path.to_string();
        self.redirects.lock().push(path.to_string());
    }
}
