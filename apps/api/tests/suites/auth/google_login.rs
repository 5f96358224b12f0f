use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::test;
use api::domain::Role;
use api_test_support::unique_helpers::{unique_email, unique_provider_id};

use crate::common::{assert_problem_details, set_cookie};
use crate::support::app_builder::create_test_app;
use crate::support::identity::google_identity;
use crate::support::test_state::{test_state, test_state_with_identity};

fn state_cookie(value: &str) -> Cookie<'static> {
    Cookie::new("oauth_state", value.to_string())
}

#[actix_web::test]
async fn start_sets_state_cookie_and_redirects() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_with_identity("code-1", google_identity("g", "g@example.com")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/auth/google").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let nonce = set_cookie(resp.headers(), "oauth_state").expect("state cookie");
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert!(location.contains(&format!("state={}", nonce.value())));
    assert_eq!(nonce.http_only(), Some(true));
    Ok(())
}

#[actix_web::test]
async fn callback_logs_in_and_lands_on_dashboard() -> Result<(), Box<dyn std::error::Error>> {
    let email = unique_email("login");
    let identity = google_identity(&unique_provider_id(), &email);
    let state = test_state_with_identity("good-code", identity.clone()).await;
    let directory = state.directory.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?code=good-code&state=nonce-1")
        .cookie(state_cookie("nonce-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://app.example.test/dashboard"
    );

    let access = set_cookie(resp.headers(), "access_token").expect("access cookie");
    assert!(!access.value().is_empty());
    assert!(set_cookie(resp.headers(), "refresh_token").is_some());
    let cleared = set_cookie(resp.headers(), "oauth_state").expect("state removal");
    assert!(cleared.value().is_empty());

    let user = directory
        .find_by_provider_id("google", &identity.provider_id)
        .await?
        .expect("subject created on first login");
    assert_eq!(user.email, email);
    assert_eq!(user.role, Role::User);
    assert!(user.last_login.is_some());

    // The access cookie alone is enough for the next request.
    let me = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(Cookie::new("access_token", access.value().to_string()))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, me).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["role"], "user");
    assert_eq!(body["status"], "active");
    Ok(())
}

#[actix_web::test]
async fn callback_with_mismatched_state_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_with_identity("good-code", google_identity("g", "g@example.com")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?code=good-code&state=forged")
        .cookie(state_cookie("nonce-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_OAUTH_STATE", StatusCode::BAD_REQUEST).await;
    Ok(())
}

#[actix_web::test]
async fn callback_without_state_cookie_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_with_identity("good-code", google_identity("g", "g@example.com")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?code=good-code&state=nonce-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_OAUTH_STATE", StatusCode::BAD_REQUEST).await;
    Ok(())
}

#[actix_web::test]
async fn callback_without_code_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_with_identity("good-code", google_identity("g", "g@example.com")).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/auth/google/callback?state=nonce-1")
        .cookie(state_cookie("nonce-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "MISSING_OAUTH_CODE", StatusCode::BAD_REQUEST).await;
    Ok(())
}

#[actix_web::test]
async fn login_unavailable_without_provider() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/auth/google").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_server_error());
    Ok(())
}
