//! Client configuration: a TOML file plus environment overrides.

use crate::error::config::ConfigError;

use common::RedactedSecret;
use models::connection::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_RPC_PATH, DEFAULT_RPC_PORT};
use models::{ConnectionConfig, ConnectionConfigBuilder, Credentials};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "tremote.toml";
pub const CONFIG_DIR_NAME: &str = "tremote";

pub const ENV_HOST: &str = "TREMOTE_HOST";
pub const ENV_PORT: &str = "TREMOTE_PORT";
pub const ENV_SECURE: &str = "TREMOTE_SECURE";
pub const ENV_USERNAME: &str = "TREMOTE_USERNAME";
pub const ENV_PASSWORD: &str = "TREMOTE_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "TREMOTE_TIMEOUT_SECS";

const MAX_TIMEOUT_SECS: u64 = 600;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub rpc_path: String,
    pub username: Option<String>,
    pub password: Option<RedactedSecret>,
    pub timeout_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_RPC_PORT,
            secure: false,
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            username: None,
            password: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the log file. Defaults to the platform data directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub daemon: DaemonConfig,
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    crate::DEFAULT_DAEMON_HOST.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// `{config_dir}/tremote/tremote.toml`, when the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

        let config = Self::parse(&contents, path)?;
        config.validate()?;

        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::parse(path, e.to_string()))
    }

    /// Load `path` (or the default location), then apply `.env` and process
    /// environment overrides, then validate the result.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override daemon settings from `TREMOTE_*` variables that are set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        let daemon = &mut self.daemon;

        if let Some(host) = env_var(ENV_HOST) {
            daemon.host = host;
        }
        if let Some(port) = env_var(ENV_PORT) {
            daemon.port = parse_env(ENV_PORT, &port)?;
        }
        if let Some(secure) = env_var(ENV_SECURE) {
            daemon.secure = parse_flag(ENV_SECURE, &secure)?;
        }
        if let Some(username) = env_var(ENV_USERNAME) {
            daemon.username = Some(username);
        }
        if let Some(password) = env_var(ENV_PASSWORD) {
            daemon.password = Some(RedactedSecret::new(password));
        }
        if let Some(timeout) = env_var(ENV_TIMEOUT_SECS) {
            daemon.timeout_secs = parse_env(ENV_TIMEOUT_SECS, &timeout)?;
        }

        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let daemon = &self.daemon;

        if daemon.host.trim().is_empty() {
            return Err(ConfigError::validation("daemon.host cannot be empty"));
        }

        if daemon.port == 0 {
            return Err(ConfigError::validation("daemon.port cannot be 0"));
        }

        if !daemon.rpc_path.starts_with('/') {
            return Err(ConfigError::validation(format!(
                "daemon.rpc_path must start with '/': {}",
                daemon.rpc_path
            )));
        }

        if daemon.timeout_secs == 0 || daemon.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::validation(format!(
                "Invalid timeout: {} (must be 1-{MAX_TIMEOUT_SECS} seconds)",
                daemon.timeout_secs
            )));
        }

        if daemon.password.is_some() && daemon.username.is_none() {
            return Err(ConfigError::validation("daemon.password is set without daemon.username"));
        }

        Ok(())
    }

    /// Session settings for the configured daemon.
    pub fn connection_config(&self) -> Result<ConnectionConfig, ConfigError> {
        let daemon = &self.daemon;
        let credentials = daemon.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: daemon.password.clone().unwrap_or_else(|| RedactedSecret::new("")),
        });

        ConnectionConfigBuilder::default()
            .with_host(daemon.host.clone())
            .with_port(daemon.port)
            .with_secure(daemon.secure)
            .with_rpc_path(daemon.rpc_path.clone())
            .with_optional_credentials(credentials)
            .with_timeout(Duration::from_secs(daemon.timeout_secs))
            .build()
            .map_err(|e| ConfigError::validation(e.to_string()))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[track_caller]
fn parse_env<V: std::str::FromStr>(variable: &'static str, value: &str) -> Result<V, ConfigError>
where
    V::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: V::Err| ConfigError::environment(variable, format!("'{value}': {e}")))
}

#[track_caller]
fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::environment(
            variable,
            format!("'{value}' is not a boolean"),
        )),
    }
}
