// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by the connector

// Provider Configuration
pub const OWUI_URL: &str = "OWUI_URL";
pub const OWUI_CLIENT_ID: &str = "OWUI_CLIENT_ID";
pub const OWUI_CLIENT_SECRET: &str = "OWUI_CLIENT_SECRET";
pub const OWUI_REDIRECT_URI: &str = "OWUI_REDIRECT_URI";
pub const OWUI_HTTP_TIMEOUT_SECS: &str = "OWUI_HTTP_TIMEOUT_SECS";

// Site Metadata
pub const OWUI_SITE_URL: &str = "OWUI_SITE_URL";
pub const OWUI_SITE_NAME: &str = "OWUI_SITE_NAME";

// Storage
pub const OWUI_DATABASE_PATH: &str = "OWUI_DATABASE_PATH";

// Defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_SITE_NAME: &str = "WordPress";

/// Admin page the provider redirects back to
pub const ADMIN_PAGE_PATH: &str = "/wp-admin/options-general.php?page=wp-openwebui-connector";
