use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use api::auth::jwt::mint_credential;
use api::auth::{CredentialClass, SessionService, TokenPair};
use api::domain::User;
use api::state::app_state::AppState;

pub fn issue_pair(state: &AppState, user: &User) -> TokenPair {
    SessionService::from_state(state)
        .issue_tokens(user)
        .expect("tokens should be issued")
}

/// Access credential issued two hours ago, so already past its 1h lifetime.
pub fn expired_access_token(state: &AppState, user: &User) -> String {
    let issued_at = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    mint_credential(user, CredentialClass::Access, issued_at, &state.security)
        .expect("token should be minted")
        .token
}

pub fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("access_token", token.to_string())
}

pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("refresh_token", token.to_string())
}
