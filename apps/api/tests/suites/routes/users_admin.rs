use actix_web::http::StatusCode;
use actix_web::test;
use api::domain::{Role, UserStatus};
use serde_json::{json, Value};

use crate::common::assert_problem_details;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{access_cookie, issue_pair};
use crate::support::factory::{create_active_user, create_admin};
use crate::support::test_state::test_state;

#[actix_web::test]
async fn plain_user_gets_insufficient_role() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INSUFFICIENT_ROLE", StatusCode::FORBIDDEN).await;
    Ok(())
}

#[actix_web::test]
async fn admin_route_without_cookie_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/users").to_request();
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
async fn promotion_is_honored_on_next_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let user = create_active_user(&state).await;
    let pair = issue_pair(&state, &user);
    state.directory.update_role(user.id, Role::Admin).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn bootstrap_promotes_first_caller_only() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let first = create_active_user(&state).await;
    let second = create_active_user(&state).await;
    let first_pair = issue_pair(&state, &first);
    let second_pair = issue_pair(&state, &second);
    let app = create_test_app(state).with_prod_routes().build().await;

    let exists = test::TestRequest::get().uri("/users/admin/exists").to_request();
    let body: Value = test::call_and_read_body_json(&app, exists).await;
    assert_eq!(body, json!({ "exists": false }));

    let req = test::TestRequest::post()
        .uri("/users/admin/bootstrap/self")
        .cookie(access_cookie(&first_pair.access.token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["role"], "admin");

    let req = test::TestRequest::post()
        .uri("/users/admin/bootstrap/self")
        .cookie(access_cookie(&second_pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "ADMIN_ALREADY_EXISTS", StatusCode::FORBIDDEN).await;

    let exists = test::TestRequest::get().uri("/users/admin/exists").to_request();
    let body: Value = test::call_and_read_body_json(&app, exists).await;
    assert_eq!(body, json!({ "exists": true }));
    Ok(())
}

#[actix_web::test]
async fn admin_lists_and_filters_users() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let target = create_active_user(&state).await;
    let pair = issue_pair(&state, &admin);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);

    let needle = target.email.split('@').next().unwrap_or_default().to_uppercase();
    let req = test::TestRequest::get()
        .uri(&format!("/users?q={needle}"))
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let hits: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], target.id.to_string());
    Ok(())
}

#[actix_web::test]
async fn admin_creates_user_and_rejects_bad_email() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let pair = issue_pair(&state, &admin);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .set_json(json!({
            "provider": "google",
            "providerId": "created-1",
            "email": "created@example.com",
            "name": "Created"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "user");
    assert_eq!(body["status"], "active");

    let req = test::TestRequest::post()
        .uri("/users")
        .cookie(access_cookie(&pair.access.token))
        .set_json(json!({
            "provider": "google",
            "providerId": "created-2",
            "email": "nope",
            "name": "Bad"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_EMAIL", StatusCode::UNPROCESSABLE_ENTITY).await;
    Ok(())
}

#[actix_web::test]
async fn suspension_locks_out_on_next_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let target = create_active_user(&state).await;
    let admin_pair = issue_pair(&state, &admin);
    let target_pair = issue_pair(&state, &target);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/status", target.id))
        .cookie(access_cookie(&admin_pair.access.token))
        .set_json(json!({ "status": "suspended" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "suspended");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/status", target.id))
        .cookie(access_cookie(&admin_pair.access.token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], UserStatus::Suspended.to_string());

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .cookie(access_cookie(&target_pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "FORBIDDEN_SUSPENDED", StatusCode::FORBIDDEN).await;
    Ok(())
}

#[actix_web::test]
async fn bad_user_id_and_missing_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let pair = issue_pair(&state, &admin);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/users/not-a-uuid")
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_USER_ID", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/logs", uuid::Uuid::new_v4()))
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "USER_NOT_FOUND", StatusCode::NOT_FOUND).await;
    Ok(())
}

#[actix_web::test]
async fn admin_removes_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let target = create_active_user(&state).await;
    let pair = issue_pair(&state, &admin);
    let directory = state.directory.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", target.id))
        .cookie(access_cookie(&pair.access.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(directory.find_by_id(target.id).await?.is_none());
    Ok(())
}
