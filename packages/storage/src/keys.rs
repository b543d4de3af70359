// ABOUTME: Option names used by the connector
// ABOUTME: Kept identical to the host plugin so existing options tables stay readable

/// Pending OAuth state nonce (zero or one at a time)
pub const OAUTH_STATE: &str = "wp_openwebui_connector_oauth_state";
/// Serialized connection info (tokens and expiry)
pub const CONNECTION_INFO: &str = "wp_openwebui_connector_connection_info";
/// Connection-status marker written alongside connection info
pub const CONNECTION_STATUS: &str = "wp_openwebui_connector_connection_status";
/// Id returned when an application password is registered
pub const CONNECTION_ID: &str = "wp_openwebui_connector_connection_id";

// Settings
pub const SETTINGS: &str = "wp_openwebui_connector_settings";
pub const OPENWEBUI_URL: &str = "wp_openwebui_connector_openwebui_url";
pub const CLIENT_ID: &str = "wp_openwebui_connector_client_id";
pub const CLIENT_SECRET: &str = "wp_openwebui_connector_client_secret";
pub const SITE_URL: &str = "wp_openwebui_connector_site_url";
pub const SITE_NAME: &str = "wp_openwebui_connector_site_name";
pub const REDIRECT_URI: &str = "wp_openwebui_connector_redirect_uri";
pub const SUCCESS_REDIRECT: &str = "wp_openwebui_connector_success_redirect";
pub const HTTP_TIMEOUT: &str = "wp_openwebui_connector_http_timeout";
