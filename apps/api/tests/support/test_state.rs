use std::sync::Arc;

use api::auth::google::ExternalIdentity;
use api::config::env::RuntimeEnv;
use api::infra::state::build_state;
use api::state::app_state::AppState;
use api::state::security_config::SecurityConfig;

use super::identity::StaticIdentityProvider;

/// In-memory directory, random distinct secrets, no identity provider.
pub async fn test_state() -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .build()
        .await
        .expect("test state should build")
}

pub async fn test_state_with_security(security: SecurityConfig) -> AppState {
    build_state()
        .with_security(security)
        .build()
        .await
        .expect("test state should build")
}

/// State whose identity provider accepts `code` and asserts `identity`.
pub async fn test_state_with_identity(code: &str, identity: ExternalIdentity) -> AppState {
    build_state()
        .with_identity_provider(Arc::new(StaticIdentityProvider::new(code, identity)))
        .with_frontend_url("https://app.example.test")
        .build()
        .await
        .expect("test state should build")
}
