use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::test_state;

#[actix_web::test]
async fn health_reports_ok_without_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["directory"], "ok");
    assert!(body["app_version"].as_str().is_some());
    Ok(())
}
