use actix_web::http::{header, StatusCode};
use actix_web::test;

use crate::common::assert_problem_details;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{access_cookie, issue_pair};
use crate::support::factory::create_active_user;
use crate::support::test_state::test_state;

#[actix_web::test]
async fn forbidden_errors_carry_no_challenge() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(!resp.headers().contains_key(header::WWW_AUTHENTICATE));
    let problem = assert_problem_details(resp, "INSUFFICIENT_ROLE", StatusCode::FORBIDDEN).await;
    assert_eq!(problem.title, "Insufficient Role");
    Ok(())
}

#[actix_web::test]
async fn auth_responses_are_not_cached() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    let cache = resp
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cache.contains("no-store"));
    Ok(())
}
