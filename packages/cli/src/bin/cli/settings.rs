// ABOUTME: CLI commands for viewing and editing provider settings
// ABOUTME: Settings are stored in the option database and merged field by field

use clap::{Args, Subcommand};
use colored::*;
use owui_cli::Context;
use owui_config::{ConfigError, ConfigResult, ProviderConfig};

use super::utils::mask_secret;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the stored settings (with environment overrides applied)
    Show,
    /// Update stored settings; omitted values keep their current setting
    Set(SettingsArgs),
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// OpenWebUI base URL
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub client_id: Option<String>,
    #[arg(long)]
    pub client_secret: Option<String>,
    /// Public URL of this site
    #[arg(long)]
    pub site_url: Option<String>,
    #[arg(long)]
    pub site_name: Option<String>,
    /// OAuth callback URL registered with the provider
    #[arg(long)]
    pub redirect_uri: Option<String>,
    /// Where to send the user after connecting
    #[arg(long)]
    pub success_redirect: Option<String>,
    /// HTTP timeout in seconds (1-300)
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub async fn handle_settings_command(
    context: &Context,
    command: SettingsCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        SettingsCommands::Show => show_settings(context).await,
        SettingsCommands::Set(args) => set_settings(context, &args).await,
    }
}

async fn show_settings(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = context.provider_config().await?;

    println!("{}", "⚙️  OpenWebUI Connector Settings".bold().cyan());
    println!();
    println!("  OpenWebUI URL:     {}", config.openwebui_url);
    println!("  Client ID:         {}", config.client_id);
    println!("  Client secret:     {}", mask_secret(&config.client_secret));
    println!("  Site URL:          {}", config.site_url);
    println!("  Site name:         {}", config.site_name);
    println!("  Redirect URI:      {}", config.redirect_uri());
    println!("  Success redirect:  {}", config.success_redirect());
    println!("  HTTP timeout:      {}s", config.http_timeout_secs);

    Ok(())
}

async fn set_settings(
    context: &Context,
    args: &SettingsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let existing = ProviderConfig::load_optional(context.store()).await?;
    let config = merge_settings(existing.as_ref(), args)?;
    config.save(context.store()).await?;

    println!("{} Settings saved", "✓".green().bold());
    Ok(())
}

/// Overlay command-line values onto the current settings
pub fn merge_settings(
    existing: Option<&ProviderConfig>,
    args: &SettingsArgs,
) -> ConfigResult<ProviderConfig> {
    let mut config = ProviderConfig::new(
        pick(&args.url, existing.map(|c| c.openwebui_url.as_str()), "openwebui_url")?,
        pick(&args.client_id, existing.map(|c| c.client_id.as_str()), "client_id")?,
        pick(
            &args.client_secret,
            existing.map(|c| c.client_secret.as_str()),
            "client_secret",
        )?,
        pick(&args.site_url, existing.map(|c| c.site_url.as_str()), "site_url")?,
    )?;

    if let Some(site_name) = args
        .site_name
        .as_deref()
        .or(existing.map(|c| c.site_name.as_str()))
    {
        config = config.with_site_name(site_name)?;
    }
    if let Some(redirect_uri) = args
        .redirect_uri
        .as_deref()
        .or(existing.and_then(|c| c.redirect_uri.as_deref()))
    {
        config = config.with_redirect_uri(redirect_uri)?;
    }
    if let Some(target) = args
        .success_redirect
        .as_deref()
        .or(existing.and_then(|c| c.success_redirect.as_deref()))
    {
        config = config.with_success_redirect(target)?;
    }
    if let Some(timeout) = args.timeout.or(existing.map(|c| c.http_timeout_secs)) {
        config = config.with_http_timeout(timeout)?;
    }

    Ok(config)
}

fn pick<'a>(
    arg: &'a Option<String>,
    current: Option<&'a str>,
    field: &'static str,
) -> ConfigResult<&'a str> {
    arg.as_deref()
        .or(current)
        .ok_or(ConfigError::MissingValue(field))
}
