use super::*;
use crate::commands::test_support::{context, stored_user, FakeGitHub};

fn login_args(token: &str, refresh_token: Option<&str>) -> LoginArgs {
    LoginArgs {
        token: token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_login_creates_new_account() {
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![]);

    let account = login(&ctx, login_args("gho_new", Some("ghr_new")))
        .await
        .unwrap();

    assert_eq!(account.login, "mona");
    assert_eq!(account.external_id, 7);
    assert!(account.created_at.is_some());
    assert_eq!(account.token.as_ref().map(|t| t.expose()), Some("gho_new"));

    let stored = ctx.service.find_account("mona").await.unwrap();
    assert_eq!(stored, Some(account));
}

#[tokio::test]
async fn test_login_for_stored_account_replaces_credential() {
    let ctx = context(
        FakeGitHub::for_user("mona", 7),
        vec![stored_user("mona", 7, "gho_old")],
    );

    let account = login(&ctx, login_args("gho_new", None)).await.unwrap();

    assert_eq!(account.token.as_ref().map(|t| t.expose()), Some("gho_new"));
    assert!(account.created_at.is_none());
}

#[tokio::test]
async fn test_login_after_github_rename_reuses_stored_record() {
    let ctx = context(
        FakeGitHub::for_user("mona", 7),
        vec![stored_user("mona-old", 7, "gho_old")],
    );

    let account = login(&ctx, login_args("gho_new", None)).await.unwrap();

    assert_eq!(account.login, "mona-old");
    assert_eq!(account.token.as_ref().map(|t| t.expose()), Some("gho_new"));
    assert!(ctx.service.find_account("mona").await.unwrap().is_none());

    let stored = ctx
        .service
        .find_account_by_external_id(7)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, account);
}

#[tokio::test]
async fn test_login_with_rejected_token() {
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![]);

    let result = login(&ctx, login_args("gho_revoked", None)).await;

    assert!(matches!(
        result,
        Err(Error::GitHub(github_client::Error::Unauthorized))
    ));
    assert!(ctx.service.find_account("mona").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_rejects_blank_token() {
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![]);

    let result = login(&ctx, login_args("  ", None)).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[tokio::test]
async fn test_refresh_token_updates_stored_account() {
    let ctx = context(
        FakeGitHub::for_user("mona", 7),
        vec![stored_user("mona", 7, "gho_old")],
    );

    let account = refresh_token(
        &ctx,
        RefreshTokenArgs {
            login: "mona".to_string(),
            token: "gho_fresh".to_string(),
            refresh_token: Some("ghr_fresh".to_string()),
        },
    )
    .await
    .unwrap();

    let stored = ctx.service.find_account("mona").await.unwrap().unwrap();
    assert_eq!(stored, account);
    assert_eq!(stored.token.as_ref().map(|t| t.expose()), Some("gho_fresh"));
    assert_eq!(
        stored.refresh_token.as_ref().map(|t| t.expose()),
        Some("ghr_fresh")
    );
}

#[tokio::test]
async fn test_refresh_token_for_unknown_account() {
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![]);

    let result = refresh_token(
        &ctx,
        RefreshTokenArgs {
            login: "ghost".to_string(),
            token: "gho_fresh".to_string(),
            refresh_token: None,
        },
    )
    .await;

    assert!(matches!(result, Err(Error::AccountNotFound(login)) if login == "ghost"));
}

#[tokio::test]
async fn test_show_redacts_tokens() {
    let mut account = stored_user("mona", 7, "gho_secret");
    account.refresh_token = Some(github_client::AccessToken::new("ghr_secret"));
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![account]);

    let rendered = show(&ctx, "mona").await.unwrap();

    assert!(!rendered.contains("gho_secret"));
    assert!(!rendered.contains("ghr_secret"));

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["_id"], "mona");
    assert_eq!(value["token"], "[REDACTED]");
    assert_eq!(value["refreshToken"], "[REDACTED]");
}

#[tokio::test]
async fn test_show_unknown_account() {
    let ctx = context(FakeGitHub::for_user("mona", 7), vec![]);

    assert!(matches!(
        show(&ctx, "ghost").await,
        Err(Error::AccountNotFound(_))
    ));
}
