use super::*;
use serde_json::from_str;

#[test]
fn test_user_profile_deserialization() {
    let json_str = r#"{
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "html_url": "https://github.com/octocat",
        "type": "User",
        "site_admin": false,
        "name": "The Octocat",
        "company": "@github",
        "blog": "https://github.blog",
        "location": "San Francisco",
        "email": null,
        "bio": null,
        "public_repos": 8
    }"#;

    let profile: UserProfile = from_str(json_str).expect("Failed to deserialize UserProfile");

    assert_eq!(profile.id, 583231);
    assert_eq!(profile.login, "octocat");
    assert_eq!(profile.name.as_deref(), Some("The Octocat"));
    assert_eq!(profile.company.as_deref(), Some("@github"));
    assert_eq!(profile.location.as_deref(), Some("San Francisco"));
    assert_eq!(profile.account_type, "User");
    assert!(profile.email.is_none());
    assert!(profile.bio.is_none());
}

#[test]
fn test_organization_summary_deserialization() {
    let json_str = r#"{
        "login": "github",
        "id": 1,
        "node_id": "MDEyOk9yZ2FuaXphdGlvbjE=",
        "url": "https://api.github.com/orgs/github",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "description": "A great organization"
    }"#;

    let org: OrganizationSummary =
        from_str(json_str).expect("Failed to deserialize OrganizationSummary");

    assert_eq!(org.id, 1);
    assert_eq!(org.login, "github");
    assert_eq!(
        org.avatar_url.as_deref(),
        Some("https://github.com/images/error/octocat_happy.gif")
    );
}

#[test]
fn test_organization_profile_with_missing_optional_fields() {
    let json_str = r#"{"login": "tiny-org", "id": 77}"#;

    let org: OrganizationProfile = from_str(json_str).expect("Failed to deserialize");

    assert_eq!(org.login, "tiny-org");
    assert_eq!(org.id, 77);
    assert!(org.name.is_none());
    assert!(org.description.is_none());
    assert!(org.blog.is_none());
}

#[test]
fn test_repository_owner_is_prefix_of_full_name() {
    let repo = Repository::new("hello-world", "octo-org/hello-world", true);

    assert_eq!(repo.owner(), "octo-org");
    assert_eq!(repo.name(), "hello-world");
    assert!(repo.is_private());
}

#[test]
fn test_repository_deserialization_ignores_extra_fields() {
    let json_str = r#"{
        "id": 1296269,
        "node_id": "MDEwOlJlcG9zaXRvcnkxMjk2MjY5",
        "name": "Hello-World",
        "full_name": "octocat/Hello-World",
        "private": false,
        "owner": {"login": "octocat", "id": 1}
    }"#;

    let repo: Repository = from_str(json_str).expect("Failed to deserialize Repository");

    assert_eq!(repo.full_name(), "octocat/Hello-World");
    assert_eq!(repo.name(), "Hello-World");
    assert!(!repo.is_private());
}
