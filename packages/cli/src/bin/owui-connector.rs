use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::settings::SettingsCommands;
use owui_cli::{init_tracing, CliConfig, Context};

#[derive(Parser)]
#[command(name = "owui-connector")]
#[command(about = "Connect a site to OpenWebUI over OAuth2")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change provider settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Print the authorization URL that starts a connection
    Authorize {
        /// Also open the URL in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Finish connecting with the URL (or query string) the provider redirected to
    Callback {
        /// Full callback URL or its query string
        input: String,
    },
    /// Show connection status
    Status,
    /// Print a valid access token, refreshing it first if needed
    Token,
    /// Revoke the access token and forget the connection
    Disconnect,
    /// Check the connection against the provider
    Test,
    /// Register an application password with the provider
    Register {
        /// Application password generated for the site user
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    let context = Context::open(&config).await?;

    match command {
        Commands::Settings(settings_cmd) => {
            cli::settings::handle_settings_command(&context, settings_cmd).await
        }
        Commands::Authorize { open } => cli::connection::authorize_command(&context, open).await,
        Commands::Callback { input } => cli::connection::callback_command(&context, &input).await,
        Commands::Status => cli::connection::status_command(&context).await,
        Commands::Token => cli::connection::token_command(&context).await,
        Commands::Disconnect => cli::connection::disconnect_command(&context).await,
        Commands::Test => cli::connection::test_command(&context).await,
        Commands::Register { password } => {
            cli::connection::register_command(&context, &password).await
        }
    }
}
