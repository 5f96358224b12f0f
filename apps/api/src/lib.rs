#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod directory;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{issue, mint_credential, verify, verify_credential, IssuedCredential};
pub use auth::{
    authorize, AuthFailure, Claims, CookiePolicy, CredentialClass, RequiredRoles,
    SessionService, SessionVerifier, SubjectContext, TokenPair,
};
pub use config::auth::AuthConfig;
pub use config::env::RuntimeEnv;
pub use directory::{InMemoryUserDirectory, SeaUserDirectory, UserDirectory};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::{CurrentUser, RefreshSubject};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::require_roles::RequireRoles;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    api_test_support::logging::init();
}
