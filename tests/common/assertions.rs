//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert JSON response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert the response is a JSON error with the given status and message
pub fn assert_api_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    assert_json_status(response, expected.as_u16());

    let json: serde_json::Value = response.json();
    assert_eq!(json["error"].as_str(), Some(message));
}

/// Assert a successful upload and return the record it reports
pub fn assert_upload_ok(response: &TestResponse) -> serde_json::Value {
    assert_ok(response);
    assert_json_status(response, 200);

    let json: serde_json::Value = response.json();
    assert_eq!(json["message"], "Upload successful");
    assert!(json["record"].is_object(), "Expected record in response");
    json["record"].clone()
}

/// Assert the response carries the given Content-Type
pub fn assert_content_type(response: &TestResponse, expected: &str) {
    let content_type = response.header("content-type");
    assert_eq!(
        content_type,
        Some(expected),
        "Expected Content-Type: {expected}"
    );
}
