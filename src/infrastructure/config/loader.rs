use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{Config, RemoteKind};

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".sidebyside";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("security.permit_all is false but no users are configured")]
    MissingCredentials,

    #[error("remote.kind is odata but base_url is {0:?}; an http(s) URL is required")]
    InvalidRemoteUrl(Option<String>),

    #[error("Invalid remote.timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .sidebyside/config.yaml (project config, created by init)
    /// 3. .sidebyside/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SIDEBYSIDE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config = Self::figment(Path::new(CONFIG_DIR))
            .extract::<Config>()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SIDEBYSIDE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("SIDEBYSIDE_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if !config.security.permit_all && config.security.users.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        for user in &config.security.users {
            if user.username.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "security user name cannot be empty".to_string(),
                ));
            }
        }

        if config.remote.kind == RemoteKind::Odata {
            let valid = config
                .remote
                .base_url
                .as_deref()
                .is_some_and(|url| url.starts_with("http://") || url.starts_with("https://"));
            if !valid {
                return Err(ConfigError::InvalidRemoteUrl(config.remote.base_url.clone()));
            }
        }

        if config.remote.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.remote.timeout_secs));
        }

        Ok(())
    }
}
