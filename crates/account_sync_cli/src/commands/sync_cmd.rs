//! The `sync` command.

use account_sync_core::{Account, ReauthState};
use colored::Colorize;
use tracing::instrument;

use super::CommandContext;
use crate::errors::Error;

#[cfg(test)]
#[path = "sync_cmd_tests.rs"]
mod tests;

/// Runs a full synchronization of the stored account `login`.
#[instrument(skip(ctx))]
pub async fn sync(ctx: &CommandContext, login: &str) -> Result<Account, Error> {
    let account = ctx
        .service
        .find_account(login)
        .await?
        .ok_or_else(|| Error::AccountNotFound(login.to_string()))?;

    Ok(ctx.service.full_sync(account).await?)
}

/// Formats the outcome of a sync for the terminal.
pub fn format_summary(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n\n", account.login.bold().bright_cyan()));
    output.push_str(&format!("{}: {:?}\n", "Type".bold(), account.kind));

    let status = match account.needs_reauth {
        ReauthState::NotNeeded => "up to date".green(),
        ReauthState::Required => "credential rejected, sign in again".red(),
        ReauthState::MoreRights => "missing scopes, sign in again".yellow(),
    };
    output.push_str(&format!("{}: {}\n", "Status".bold(), status));

    if let Some(created_at) = &account.created_at {
        output.push_str(&format!("{}: {}\n", "Created".bold(), created_at));
    }

    output.push_str(&format!(
        "{}: {}\n",
        "Repositories".bold(),
        account.accessible_repositories().len()
    ));

    if account.orgs.is_empty() {
        output.push_str(&format!("{}: {}\n", "Organizations".bold(), "(none)".dimmed()));
    } else {
        let names: Vec<&str> = account.orgs.iter().map(|org| org.name.as_str()).collect();
        output.push_str(&format!("{}: {}\n", "Organizations".bold(), names.join(", ")));
    }

    output
}
