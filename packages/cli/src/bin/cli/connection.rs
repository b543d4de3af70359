// ABOUTME: CLI commands for the OAuth connection lifecycle
// ABOUTME: Authorize, callback, status, token, disconnect, and authenticated API calls

use colored::*;
use owui_auth::{AuthError, ConnectionStatus};
use owui_cli::Context;

use super::utils::{format_timestamp, parse_callback_input};

pub async fn authorize_command(
    context: &Context,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = context.session().await?;
    let authorization = session.build_authorization_url().await?;

    println!("{}", "🔐 Connect to OpenWebUI".bold().cyan());
    println!();
    println!("Visit this URL to authorize the connection:");
    println!("  {}", authorization.url.yellow());
    println!();
    println!(
        "Then run {} with the URL you are redirected to.",
        "owui-connector callback <url>".yellow()
    );

    if open_browser {
        if let Err(e) = open::that(&authorization.url) {
            eprintln!(
                "{} Failed to open browser ({}). Please visit the URL manually.",
                "⚠".yellow().bold(),
                e
            );
        }
    }

    Ok(())
}

pub async fn callback_command(
    context: &Context,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_callback_input(input)?;
    let session = context.session().await?;
    let success = session.handle_callback(params).await?;

    println!("{} {}", "✓".green().bold(), success.message);
    println!("  Continue at: {}", success.redirect.cyan());
    Ok(())
}

pub async fn status_command(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = context.session().await?;
    let report = session.connection_status().await?;

    println!("{}", "🔐 OpenWebUI Connection Status".bold().cyan());
    println!();

    let icon = match report.status {
        ConnectionStatus::Connected => "✓".green().bold(),
        ConnectionStatus::Expired => "⚠".yellow().bold(),
        ConnectionStatus::Disconnected => "✗".red().bold(),
    };
    println!("  {} {}", icon, report.message.bold());
    println!("        Provider: {}", session.config().openwebui_url.cyan());

    if let Some(connected_at) = report.connected_at {
        println!("        Connected: {}", format_timestamp(connected_at));
    }
    if let Some(expires_at) = report.expires_at {
        let expires = format_timestamp(expires_at);
        if report.status == ConnectionStatus::Connected {
            println!("        Expires: {}", expires.green());
        } else {
            println!("        Expires: {} {}", expires.red(), "(expired)".red());
        }
    }

    if report.status != ConnectionStatus::Connected {
        println!();
        println!(
            "Use {} to connect",
            "owui-connector authorize".yellow()
        );
    }

    Ok(())
}

pub async fn token_command(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = context.session().await?;
    let token = session
        .get_access_token()
        .await?
        .ok_or(AuthError::NotConnected)?;

    println!("{}", token);
    Ok(())
}

pub async fn disconnect_command(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = context.session().await?;

    println!("{}", "🔓 Disconnecting from OpenWebUI...".bold().cyan());
    session.disconnect().await?;
    println!("{} Disconnected", "✓".green().bold());
    Ok(())
}

pub async fn test_command(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let api = context.api().await?;
    let payload = api.test_connection().await?;

    println!("{} Connection test succeeded", "✓".green().bold());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub async fn register_command(
    context: &Context,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = context.api().await?;
    let registration = api.register_application_password(password).await?;

    println!(
        "{} Application password registered (connection {})",
        "✓".green().bold(),
        registration.connection_id.cyan()
    );
    Ok(())
}
