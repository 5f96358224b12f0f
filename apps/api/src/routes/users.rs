use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{NewUser, Role, User, UserStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::middleware::RequireRoles;
use crate::services::users as user_service;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct AdminExistsResponse {
    exists: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    id: Uuid,
    status: UserStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    last_logout: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogsResponse {
    id: Uuid,
    #[serde(with = "time::serde::rfc3339::option")]
    last_login: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    last_logout: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LastLogoutResponse {
    #[serde(with = "time::serde::rfc3339::option")]
    last_logout: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub provider: String,
    pub provider_id: String,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: UserStatus,
}

fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidUserId, "Invalid user id"))
}

async fn admin_exists(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let exists = user_service::admin_exists(app_state.directory.as_ref()).await?;
    Ok(HttpResponse::Ok().json(AdminExistsResponse { exists }))
}

/// First-admin bootstrap: promote the caller while no admin exists.
async fn bootstrap_self(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<User>, AppError> {
    let promoted = user_service::bootstrap_admin(app_state.directory.as_ref(), user.id).await?;
    Ok(web::Json(promoted))
}

async fn my_last_logout(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = user_service::get_user(app_state.directory.as_ref(), user.id).await?;
    Ok(HttpResponse::Ok().json(LastLogoutResponse {
        last_logout: record.last_logout,
    }))
}

async fn list_users(
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<User>>, AppError> {
    let users = user_service::list_users(app_state.directory.as_ref(), query.q.as_deref()).await?;
    Ok(web::Json(users))
}

async fn create_user(
    body: web::Json<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new_user = NewUser::new(body.provider, body.provider_id, body.email, body.name)
        .with_picture(body.picture)
        .with_role(body.role.unwrap_or(Role::User))
        .with_status(body.status.unwrap_or(UserStatus::Active));

    let user = user_service::create_user(app_state.directory.as_ref(), new_user).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn remove_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&path)?;
    user_service::remove_user(app_state.directory.as_ref(), id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse { message: "deleted" }))
}

async fn get_status(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(app_state.directory.as_ref(), parse_user_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(StatusResponse {
        id: user.id,
        status: user.status,
        last_login: user.last_login,
        last_logout: user.last_logout,
    }))
}

async fn update_status(
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<User>, AppError> {
    let id = parse_user_id(&path)?;
    let user = user_service::set_status(app_state.directory.as_ref(), id, body.status).await?;
    Ok(web::Json(user))
}

async fn get_logs(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(app_state.directory.as_ref(), parse_user_id(&path)?).await?;
    Ok(HttpResponse::Ok().json(LogsResponse {
        id: user.id,
        last_login: user.last_login,
        last_logout: user.last_logout,
    }))
}

/// Required roles are declared per resource here, at registration.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/exists").route(web::get().to(admin_exists)))
        .service(
            web::resource("/admin/bootstrap/self")
                .wrap(RequireRoles::authenticated())
                .route(web::post().to(bootstrap_self)),
        )
        .service(
            web::resource("/me/logout")
                .wrap(RequireRoles::authenticated())
                .route(web::get().to(my_last_logout)),
        )
        .service(
            web::resource("")
                .wrap(RequireRoles::admin())
                .route(web::get().to(list_users))
                .route(web::post().to(create_user)),
        )
        .service(
            web::resource("/{id}")
                .wrap(RequireRoles::admin())
                .route(web::delete().to(remove_user)),
        )
        .service(
            web::resource("/{id}/status")
                .wrap(RequireRoles::admin())
                .route(web::get().to(get_status))
                .route(web::patch().to(update_status)),
        )
        .service(
            web::resource("/{id}/logs")
                .wrap(RequireRoles::admin())
                .route(web::get().to(get_logs)),
        );
}
