use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::session::with_cookies;
use crate::auth::{SessionService, SubjectContext};
use crate::error::AppError;
use crate::extractors::{CurrentUser, RefreshSubject};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RefreshResponse {
    refreshed: bool,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// The caller's live subject context.
async fn me(user: CurrentUser) -> Result<web::Json<SubjectContext>, AppError> {
    Ok(web::Json(user.into_inner()))
}

/// Rotate both credentials using the refresh cookie.
async fn refresh(
    subject: RefreshSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = SessionService::from_state(&app_state);
    let pair = session.rotate(&subject)?;

    Ok(with_cookies(&mut HttpResponse::Ok(), session.session_cookies(&pair))
        .json(RefreshResponse { refreshed: true }))
}

async fn logout(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = SessionService::from_state(&app_state);
    let removals = session.logout(user.id).await?;

    Ok(with_cookies(&mut HttpResponse::Ok(), removals).json(MessageResponse {
        message: "Logged out",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)))
        .service(web::resource("/refresh").route(web::get().to(refresh)))
        .service(web::resource("/logout").route(web::post().to(logout)));
}
