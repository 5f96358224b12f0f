use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::cookies::{extract_cookie, OAUTH_STATE_COOKIE};
use crate::auth::session::with_cookies;
use crate::auth::SessionService;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn not_configured() -> AppError {
    AppError::config("External login is not configured")
}

/// Start the provider handoff: set the state nonce and redirect.
async fn start(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let provider = app_state.identity.as_ref().ok_or_else(not_configured)?;
    let state = Uuid::new_v4().simple().to_string();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, provider.authorization_url(&state)))
        .cookie(app_state.cookies.oauth_state_cookie(state))
        .finish())
}

/// Provider redirect target. Creates or resolves the subject, sets both
/// session cookies, and sends the browser to the landing route.
async fn callback(
    req: HttpRequest,
    query: web::Query<CallbackQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let provider = app_state.identity.as_ref().ok_or_else(not_configured)?;
    let query = query.into_inner();

    if let Some(error) = query.error {
        security::login_failed(&format!("provider_error:{error}"), None);
        return Err(AppError::unauthorized(
            ErrorCode::Unauthorized,
            "Login was cancelled or denied",
        ));
    }

    let expected = extract_cookie(req.headers(), OAUTH_STATE_COOKIE);
    match (&expected, &query.state) {
        (Some(expected), Some(got)) if expected == got => {}
        _ => {
            security::login_failed("oauth_state_mismatch", None);
            return Err(AppError::bad_request(
                ErrorCode::InvalidOauthState,
                "Login state mismatch; please try again",
            ));
        }
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::MissingOauthCode, "Missing code"))?;

    let identity = provider.exchange(&code).await.map_err(|e| {
        security::login_failed("identity_exchange_failed", None);
        AppError::from(e)
    })?;

    let session = SessionService::from_state(&app_state);
    let (_, pair) = session.login(identity).await?;

    Ok(
        with_cookies(&mut HttpResponse::Found(), session.session_cookies(&pair))
            .cookie(app_state.cookies.oauth_state_removal())
            .insert_header((header::LOCATION, app_state.landing_url()))
            .finish(),
    )
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/google").route(web::get().to(start)))
        .service(web::resource("/google/callback").route(web::get().to(callback)));
}
