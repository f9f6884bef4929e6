#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    gateway_test_support::logging::init();
}

/// Assert a response is a gateway error: given status, `{"Error": message}`
/// body, JSON content type and a non-empty `x-trace-id` header.
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_message: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id header should not be empty");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Content-Type must be application/json (got {content_type})"
    );

    if expected_status == 401 {
        assert_eq!(
            headers.get(WWW_AUTHENTICATE).and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    } else {
        assert!(headers.get(WWW_AUTHENTICATE).is_none());
    }

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "Error": expected_message }));
}
