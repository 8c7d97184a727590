//! Configuration module for loading TOML configuration files and
//! environment overrides.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database connection configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// PostgreSQL connection and pool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database server host.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Time allowed for acquiring a connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Time an unused connection may stay idle before it is closed, in milliseconds.
    pub idle_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "postgres".to_string(),
            max_connections: 20,
            connect_timeout_ms: 5_000,
            idle_timeout_ms: 30_000,
        }
    }
}

impl DatabaseConfig {
    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Idle timeout as a [`Duration`].
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the runtime configuration: the file named by `CONFIG_PATH`
    /// (or defaults when unset), then process environment overrides.
    ///
    /// # Errors
    /// Returns error if the file cannot be loaded or an override is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from a key lookup (normally the process environment).
    ///
    /// Recognised keys: `HOST`, `PORT`, `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_NAME`, `DB_MAX_CONNECTIONS`, `DB_CONNECT_TIMEOUT_MS`,
    /// `DB_IDLE_TIMEOUT_MS`.
    ///
    /// # Errors
    /// Returns error if a numeric override does not parse or the result fails validation.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = parse_override("DB_PORT", &port)?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.name = name;
        }
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_override("DB_MAX_CONNECTIONS", &max)?;
        }
        if let Some(ms) = lookup("DB_CONNECT_TIMEOUT_MS") {
            self.database.connect_timeout_ms = parse_override("DB_CONNECT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("DB_IDLE_TIMEOUT_MS") {
            self.database.idle_timeout_ms = parse_override("DB_IDLE_TIMEOUT_MS", &ms)?;
        }

        self.validate()
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database host cannot be empty".to_string(),
            ));
        }
        if db.user.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database user cannot be empty".to_string(),
            ));
        }
        if db.name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database name cannot be empty".to_string(),
            ));
        }
        if db.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "database max_connections must be positive".to_string(),
            ));
        }
        if db.connect_timeout_ms == 0 || db.idle_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "database timeouts must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{key} must be a number, got '{raw}'")))
}
