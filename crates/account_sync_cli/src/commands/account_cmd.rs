//! Account credential commands.
//!
//! `login` stores the account behind a freshly issued OAuth token,
//! `refresh-token` replaces the credential of a stored account and `show`
//! prints a stored record with its tokens redacted.

use account_sync_core::Account;
use auth_handler::GitHubAuthPayload;
use clap::Args;
use github_client::Credentials;
use secrecy::SecretString;
use tracing::{debug, info, instrument};

use super::CommandContext;
use crate::errors::Error;

#[cfg(test)]
#[path = "account_cmd_tests.rs"]
mod tests;

const REDACTED: &str = "[REDACTED]";

/// Arguments for `login`
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// OAuth access token issued for the account
    #[arg(long)]
    pub token: String,

    /// OAuth refresh token, when the app issues one
    #[arg(long)]
    pub refresh_token: Option<String>,
}

/// Arguments for `refresh-token`
#[derive(Args, Debug)]
pub struct RefreshTokenArgs {
    /// Login of the stored account
    pub login: String,

    /// New OAuth access token
    #[arg(long)]
    pub token: String,

    /// New OAuth refresh token
    #[arg(long)]
    pub refresh_token: Option<String>,
}

fn require_token(token: &str) -> Result<(), Error> {
    if token.trim().is_empty() {
        return Err(Error::InvalidArguments(
            "--token must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Stores the account a token was issued for.
///
/// A new account is created from the token's profile. If the account is
/// already stored, only its credential is replaced. Stored accounts are
/// matched on the GitHub id first, so a user who changed their login keeps a
/// single record.
#[instrument(skip(ctx, args))]
pub async fn login(ctx: &CommandContext, args: LoginArgs) -> Result<Account, Error> {
    require_token(&args.token)?;

    let credentials = Credentials::from_raw(args.token.clone(), args.refresh_token.clone());
    let (profile, _orgs) = ctx.api.fetch_user_profile(&credentials).await?;
    debug!(login = %profile.login, external_id = profile.id, "Token belongs to account");

    let existing = match ctx.service.find_account_by_external_id(profile.id).await? {
        Some(account) => Some(account),
        None => ctx.service.find_account(&profile.login).await?,
    };
    if let Some(existing) = existing {
        info!(
            login = %existing.login,
            "Account already stored, replacing credential"
        );
        return Ok(ctx.service.refresh_credential(existing, credentials).await?);
    }

    let payload = GitHubAuthPayload::from_profile(
        &profile,
        SecretString::from(args.token),
        args.refresh_token.map(SecretString::from),
    );
    Ok(ctx.service.create_account_from_auth_result(&payload).await?)
}

/// Replaces the credential of a stored account.
#[instrument(skip(ctx, args), fields(login = %args.login))]
pub async fn refresh_token(ctx: &CommandContext, args: RefreshTokenArgs) -> Result<Account, Error> {
    require_token(&args.token)?;

    let account = ctx
        .service
        .find_account(&args.login)
        .await?
        .ok_or_else(|| Error::AccountNotFound(args.login.clone()))?;

    let credentials = Credentials::from_raw(args.token, args.refresh_token);
    Ok(ctx.service.refresh_credential(account, credentials).await?)
}

/// Renders a stored account as pretty JSON with its tokens redacted.
#[instrument(skip(ctx))]
pub async fn show(ctx: &CommandContext, login: &str) -> Result<String, Error> {
    let account = ctx
        .service
        .find_account(login)
        .await?
        .ok_or_else(|| Error::AccountNotFound(login.to_string()))?;

    render_account(&account)
}

/// Serializes an account in its stored form, replacing token values.
pub fn render_account(account: &Account) -> Result<String, Error> {
    let mut value = serde_json::to_value(account)?;
    if let Some(fields) = value.as_object_mut() {
        for key in ["token", "refreshToken"] {
            if let Some(token) = fields.get_mut(key) {
                *token = serde_json::Value::String(REDACTED.to_string());
            }
        }
    }

    Ok(serde_json::to_string_pretty(&value)?)
}
