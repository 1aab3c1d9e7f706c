use super::*;

fn scopes(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_all_required_scopes_granted() {
    let granted = scopes(&["repo", "user:email", "write:repo_hook", "read:org"]);

    assert!(missing_scopes(&granted).is_empty());
}

#[test]
fn test_each_single_missing_scope_is_reported() {
    for absent in REQUIRED_SCOPES {
        let granted: Vec<String> = REQUIRED_SCOPES
            .iter()
            .filter(|s| **s != absent)
            .map(|s| s.to_string())
            .collect();

        assert_eq!(missing_scopes(&granted), vec![absent], "{absent} should be required");
    }
}

#[test]
fn test_no_scopes_granted() {
    assert_eq!(missing_scopes(&[]), REQUIRED_SCOPES.to_vec());
}

#[test]
fn test_broader_scopes_do_not_imply_required_ones() {
    // admin:org covers read:org on GitHub, but the check is by exact name.
    let granted = scopes(&["user:email", "write:repo_hook", "admin:org"]);

    assert_eq!(missing_scopes(&granted), vec!["read:org"]);
}

#[test]
fn test_auth_error_messages() {
    assert_eq!(
        AuthError::InvalidCredentials.to_string(),
        "Invalid credentials provided"
    );
    assert_eq!(
        AuthError::GitHubError(github_client::Error::NotFound).to_string(),
        "GitHub API error: Resource not found"
    );
}

#[test]
fn test_payload_from_profile_copies_identity_and_tokens() {
    let profile = github_client::UserProfile {
        id: 42,
        login: "hubot".to_string(),
        name: Some("Hubot".to_string()),
        email: Some("hubot@example.com".to_string()),
        html_url: Some("https://github.com/hubot".to_string()),
        avatar_url: Some("https://example.com/hubot.png".to_string()),
        account_type: "User".to_string(),
        ..Default::default()
    };

    let payload =
        GitHubAuthPayload::from_profile(&profile, "gho_abc".into(), Some("ghr_def".into()));

    assert_eq!(payload.username, "hubot");
    assert_eq!(payload.id, 42);
    assert_eq!(payload.display_name.as_deref(), Some("Hubot"));

    let credentials = payload.credentials();
    assert_eq!(credentials.token.expose(), "gho_abc");
    assert_eq!(
        credentials.refresh_token.as_ref().map(|t| t.expose()),
        Some("ghr_def")
    );

    let debug_output = format!("{:?}", payload);
    assert!(!debug_output.contains("gho_abc"));
}
