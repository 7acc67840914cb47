use assistant_api::error::parse_error_message;
use reqwest::StatusCode;

#[test]
fn error_message_from_plain_string_error_field() {
    let message = parse_error_message(StatusCode::BAD_REQUEST, r#"{"error":"exists"}"#);
    assert_eq!(message, "exists");
}

#[test]
fn error_message_from_nested_message_field() {
    let message = parse_error_message(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":{"message":"backend unavailable"}}"#,
    );
    assert_eq!(message, "backend unavailable");
}

#[test]
fn error_message_falls_back_to_raw_body() {
    let message = parse_error_message(StatusCode::BAD_GATEWAY, "upstream connect error");
    assert_eq!(message, "upstream connect error");
}

#[test]
fn error_message_falls_back_to_status_reason_for_empty_body() {
    let message = parse_error_message(StatusCode::SERVICE_UNAVAILABLE, "");
    assert_eq!(message, "Service Unavailable");
}

#[test]
fn error_message_ignores_empty_error_field() {
    let message = parse_error_message(StatusCode::BAD_REQUEST, r#"{"error":"  "}"#);
    assert_eq!(message, r#"{"error":"  "}"#);
}
