// ABOUTME: Shared setup for the owui-connector binary
// ABOUTME: Logging initialization, runtime configuration, and session construction

pub mod config;
pub mod context;

pub use config::{CliConfig, CliConfigError};
pub use context::Context;

/// Install the global tracing subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
