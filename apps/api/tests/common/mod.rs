#![allow(dead_code)]

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    api_test_support::logging::init();
}

pub use api_test_support::problem_details::{assert_problem_details, ProblemDetailsLike};

/// Value of `name` from the response's `Set-Cookie` headers, if set.
pub fn set_cookie<'a>(
    headers: &'a actix_web::http::header::HeaderMap,
    name: &str,
) -> Option<actix_web::cookie::Cookie<'a>> {
    headers
        .get_all(actix_web::http::header::SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| actix_web::cookie::Cookie::parse(raw).ok())
        .find(|c| c.name() == name)
}
