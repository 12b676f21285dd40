use super::*;

#[test]
fn auth_error_displays_message_verbatim() {
    let err = AuthError::new("network down");
    assert_eq!(err.to_string(), "network down");
}

#[test]
fn from_status_prefers_provider_msg_field() {
    let err = AuthError::from_status(400, r#"{"code":400,"msg":"Unsupported provider"}"#);
    assert_eq!(err.message, "auth request failed: 400: Unsupported provider");
}

#[test]
fn from_status_reads_error_description() {
    let err = AuthError::from_status(401, r#"{"error":"invalid_grant","error_description":"Token expired"}"#);
    assert_eq!(err.message, "auth request failed: 401: Token expired");
}

#[test]
fn from_status_falls_back_to_raw_body() {
    let err = AuthError::from_status(502, "  Bad Gateway \n");
    assert_eq!(err.message, "auth request failed: 502: Bad Gateway");
}

#[test]
fn from_status_empty_body_reports_status_only() {
    let err = AuthError::from_status(500, "");
    assert_eq!(err.message, "auth request failed: 500");
}
