//! Assertions for RFC 7807 error bodies, independent of API types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Problem Details as seen on the wire.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Validate a problem response from its parts and return the parsed body.
///
/// Checks status, content type, code, and that the body `trace_id` equals
/// the `x-trace-id` header. 401 responses must carry `WWW-Authenticate`.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status, "unexpected status");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let problem: ProblemDetailsLike = serde_json::from_slice(body)
        .unwrap_or_else(|e| panic!("body is not Problem Details JSON ({e}): {body:?}"));

    let trace_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(problem.type_.ends_with(expected_code));

    if expected_status == StatusCode::UNAUTHORIZED {
        assert!(
            headers.contains_key(WWW_AUTHENTICATE),
            "401 responses must carry WWW-Authenticate"
        );
    }

    problem
}

/// Consume a test `ServiceResponse` and validate it as Problem Details.
pub async fn assert_problem_details<B>(
    resp: ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
) -> ProblemDetailsLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .unwrap_or_else(|_| panic!("failed to read response body"));

    assert_problem_details_from_parts(status, &headers, &body, expected_code, expected_status)
}
