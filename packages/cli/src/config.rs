// ABOUTME: Runtime configuration for the command-line client
// ABOUTME: Resolves the option database location from the environment

use std::env;
use std::path::PathBuf;

use owui_config::constants::OWUI_DATABASE_PATH;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".owui-connector";
const DEFAULT_DATABASE_FILE: &str = "options.db";

#[derive(Error, Debug)]
pub enum CliConfigError {
    #[error("Could not determine home directory; set {0}")]
    NoHomeDirectory(&'static str),
    #[error("{0} cannot be empty")]
    EmptyPath(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub database_path: PathBuf,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, CliConfigError> {
        Self::from_lookup(|name| env::var(name).ok(), dirs::home_dir())
    }

    pub fn from_lookup<F>(lookup: F, home: Option<PathBuf>) -> Result<Self, CliConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(OWUI_DATABASE_PATH) {
            Some(path) if path.trim().is_empty() => {
                return Err(CliConfigError::EmptyPath(OWUI_DATABASE_PATH))
            }
            Some(path) => PathBuf::from(path.trim()),
            None => home
                .ok_or(CliConfigError::NoHomeDirectory(OWUI_DATABASE_PATH))?
                .join(DEFAULT_DATA_DIR)
                .join(DEFAULT_DATABASE_FILE),
        };

        Ok(CliConfig { database_path })
    }
}
