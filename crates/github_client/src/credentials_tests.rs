use super::*;

#[test]
fn test_access_token_expose() {
    let token = AccessToken::new("gho_1234567890");

    assert_eq!(token.expose(), "gho_1234567890");
    assert_eq!(token.len(), 14);
    assert!(!token.is_empty());
}

#[test]
fn test_access_token_security() {
    let token = AccessToken::new("gho_secret_token_value");

    let debug_output = format!("{:?}", token);
    assert!(!debug_output.contains("secret"));
    assert!(debug_output.contains("REDACTED"));

    let display_output = format!("{}", token);
    assert_eq!(display_output, "[REDACTED]");
}

#[test]
fn test_credentials_debug_does_not_leak_tokens() {
    let credentials = Credentials::from_raw("gho_secret", Some("ghr_refresh_secret".to_string()));

    let debug_output = format!("{:?}", credentials);
    assert!(!debug_output.contains("gho_secret"));
    assert!(!debug_output.contains("ghr_refresh_secret"));
}

#[test]
fn test_credentials_serialize_tokens_as_strings() {
    let credentials = Credentials::from_raw("gho_abc", None);

    let json = serde_json::to_value(&credentials).expect("Serialization should succeed");

    assert_eq!(json["token"], "gho_abc");
    assert!(
        json.get("refresh_token").is_none(),
        "Missing refresh token should be omitted"
    );

    let parsed: Credentials = serde_json::from_value(json).expect("Should deserialize");
    assert_eq!(parsed, credentials);
}
