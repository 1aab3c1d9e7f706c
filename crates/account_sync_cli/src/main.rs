use clap::{Parser, Subcommand};

use account_sync_cli::commands::account_cmd::{self, LoginArgs, RefreshTokenArgs};
use account_sync_cli::commands::{config_cmd, sync_cmd, CommandContext};
use account_sync_cli::config::AppConfig;
use account_sync_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// account-sync CLI: Keep stored GitHub accounts in sync with GitHub
#[derive(Parser)]
#[command(name = "account-sync")]
#[command(about = "Keep stored GitHub accounts in sync with GitHub", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the account an OAuth token was issued for
    Login(LoginArgs),

    /// Replace the credential of a stored account
    RefreshToken(RefreshTokenArgs),

    /// Synchronize a stored account with GitHub
    Sync {
        /// Login of the stored account
        login: String,
    },

    /// Print a stored account record
    Show {
        /// Login of the stored account
        login: String,
    },

    /// Write a default configuration file
    Init,

    /// Show the CLI version
    Version,
}

async fn run(cli: Cli) -> Result<(), Error> {
    let command = match cli.command {
        Commands::Init => {
            let path = config_cmd::init_config(cli.config.as_deref())?;
            println!("Configuration written to {}", path.display());
            return Ok(());
        }
        Commands::Version => {
            println!("account-sync version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        command => command,
    };

    let config = AppConfig::resolve(cli.config.as_deref())?;
    let ctx = CommandContext::from_config(&config);

    match command {
        Commands::Login(args) => {
            let account = account_cmd::login(&ctx, args).await?;
            println!("Stored account {}", account.login);
        }
        Commands::RefreshToken(args) => {
            let account = account_cmd::refresh_token(&ctx, args).await?;
            println!("Updated credential for {}", account.login);
        }
        Commands::Sync { login } => {
            let account = sync_cmd::sync(&ctx, &login).await?;
            print!("{}", sync_cmd::format_summary(&account));
        }
        Commands::Show { login } => {
            println!("{}", account_cmd::show(&ctx, &login).await?);
        }
        Commands::Init | Commands::Version => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("ACCOUNT_SYNC_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        let code = match e {
            Error::InvalidArguments(_) | Error::Config(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
