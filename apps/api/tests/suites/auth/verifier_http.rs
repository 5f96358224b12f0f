use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use api::domain::UserStatus;
use api::state::security_config::SecurityConfig;

use crate::common::assert_problem_details;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{access_cookie, expired_access_token, issue_pair};
use crate::support::factory::create_active_user;
use crate::support::test_state::{test_state, test_state_with_security};

#[actix_web::test]
async fn missing_cookie_is_401_with_challenge() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "UNAUTHORIZED_MISSING_CREDENTIAL",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn bearer_header_is_not_a_credential() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", pair.access.token),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "UNAUTHORIZED_MISSING_CREDENTIAL",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn garbage_cookie_is_invalid_jwt() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie("not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn expired_access_is_expired_jwt() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let token = expired_access_token(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_EXPIRED_JWT", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn refresh_token_in_access_cookie_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    // Same secret for both classes, so only the class claim tells them apart.
    let security = SecurityConfig::shared("one-secret")
        .with_ttls(Duration::from_secs(3600), Duration::from_secs(86_400));
    let state = test_state_with_security(security).await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie(&pair.refresh.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn suspended_subject_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    state
        .directory
        .update_status(user.id, UserStatus::Suspended)
        .await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem =
        assert_problem_details(resp, "FORBIDDEN_SUSPENDED", StatusCode::FORBIDDEN).await;
    assert!(!problem.trace_id.is_empty());
    Ok(())
}

#[actix_web::test]
async fn deleted_subject_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    state.directory.remove(user.id).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_USER_NOT_FOUND", StatusCode::UNAUTHORIZED).await;
    Ok(())
}

#[actix_web::test]
async fn error_trace_id_matches_request_id_header() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id header");
    let problem = assert_problem_details(
        resp,
        "UNAUTHORIZED_MISSING_CREDENTIAL",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
    Ok(())
}
