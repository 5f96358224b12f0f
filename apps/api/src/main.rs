use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use api::auth::google::GoogleConfig;
use api::config::auth::AuthConfig;
use api::config::env::{opt_var, RuntimeEnv};
use api::infra::state::{build_state, DEFAULT_FRONTEND_URL};
use api::middleware::cors::{cors_middleware, parse_origins};
use api::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use api::routes;
use api::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = opt_var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let port = match opt_var("API_PORT").map(|p| p.parse::<u16>()) {
        None => 3001,
        Some(Ok(port)) => port,
        Some(Err(_)) => {
            error!("API_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let env = RuntimeEnv::from_env();
    let auth = match AuthConfig::from_env() {
        Ok(auth) => auth,
        Err(e) => {
            error!(error = %e, "invalid session configuration");
            std::process::exit(1);
        }
    };
    let security = match auth.security_config() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "invalid session configuration");
            std::process::exit(1);
        }
    };

    let origins = parse_origins(&opt_var("FRONTEND_URL").unwrap_or_default());
    let frontend_url = origins
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

    let mut builder = build_state()
        .with_env(env)
        .with_security(security)
        .with_cookie_policy(auth.cookie_policy(env))
        .with_frontend_url(frontend_url);

    match opt_var("DATABASE_URL") {
        Some(url) => builder = builder.with_database_url(url),
        None if env.is_production() => {
            error!("DATABASE_URL must be set in production");
            std::process::exit(1);
        }
        None => warn!("DATABASE_URL not set; users are kept in memory"),
    }

    match GoogleConfig::from_env() {
        Some(google) => builder = builder.with_google(google),
        None => warn!("GOOGLE_CLIENT_ID/SECRET/CALLBACK_URL not set; external login disabled"),
    }

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, production = env.is_production(), "starting API");

    let data = web::Data::new(app_state);
    let origins = Arc::new(origins);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
