use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError();

    assert_eq!(error.to_string(), "API request failed");
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid base URL".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitHub client: Invalid base URL"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_deserialization_error_keeps_source() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = Error::from(serde_error);

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize GitHub response"));
    assert!(error.source().is_some());
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound;

    assert_eq!(error.to_string(), "Resource not found");
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert!(error.source().is_none());
}

#[test]
fn test_unauthorized_error() {
    let error = Error::Unauthorized;

    assert_eq!(error.to_string(), "The credential was rejected by GitHub");
    assert!(matches!(error, Error::Unauthorized));
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
