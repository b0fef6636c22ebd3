//! Configuration module
//!
//! Settings are read from a TOML file (default
//! `~/.config/account-service/config.toml`), then selected environment
//! variables override individual keys. Every section falls back to its
//! defaults when absent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::password::DEFAULT_BCRYPT_COST;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("JWT signing secret is not configured (set security.jwt_secret or JWT_SECRET)")]
    MissingJwtSecret,

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Default config file location: `<config_dir>/account-service/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("account-service")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub security: SecuritySettings,
    pub logging: LoggingSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    /// Keep accounts in process memory instead of the SQL database
    pub in_memory: bool,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./accounts.db?mode=rwc".to_string(),
            in_memory: false,
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub bcrypt_cost: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "account-service".to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Administrator account seeded on first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub enabled: bool,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            full_name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            birth_date: "1980-01-01".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (defaults if the file does not exist), apply
    /// environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `JWT_SECRET`, `DATABASE_URL`, `PORT` and `LOG_LEVEL`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "security.bcrypt_cost",
                reason: format!("{} is outside 4..=31", self.security.bcrypt_cost),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port",
                reason: "port must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_a_secret() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.security.bcrypt_cost, 10);
        assert!(matches!(config.validate(), Err(ConfigError::MissingJwtSecret)));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [security]
            jwt_secret = "from-file"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.security.jwt_secret, "from-file");
        assert_eq!(config.security.jwt_issuer, "account-service");
        assert!(config.admin.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = AppConfig::from_toml("[server\nport = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| match key {
                "JWT_SECRET" => Some("from-env".to_string()),
                "PORT" => Some("9090".to_string()),
                "DATABASE_URL" => Some("sqlite::memory:".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.security.jwt_secret, "from-env");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
    }

    #[test]
    fn bcrypt_cost_out_of_range_is_rejected() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "secret".to_string();
        config.security.bcrypt_cost = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "security.bcrypt_cost",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("account-service-no-such-config.toml");
        // Without JWT_SECRET in the environment the defaults fail validation;
        // either way the file itself must not be required.
        match AppConfig::load(&path) {
            Ok(config) => assert!(!config.security.jwt_secret.is_empty()),
            Err(e) => assert!(matches!(e, ConfigError::MissingJwtSecret)),
        }
    }
}
