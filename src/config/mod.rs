use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while assembling the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    /// Shared secret every request must present in the Authorization header
    #[serde(skip_serializing)]
    pub token: String,
    pub enable_request_logging: bool,
}

pub const DEFAULT_API_TOKEN: &str = "token2019";
pub const DEFAULT_PORT: u16 = 2019;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup (process env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        url::Url::parse(&url).map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;

        let mut config = match environment {
            Environment::Production => Self::production(url),
            Environment::Staging => Self::staging(url),
            Environment::Development => Self::development(url),
        };
        config.apply_overrides(&lookup);
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        if let Some(v) = lookup("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("API_TOKEN") {
            if !v.is_empty() {
                self.api.token = v;
            }
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
    }

    fn development(url: String) -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                token: DEFAULT_API_TOKEN.to_string(),
                enable_request_logging: true,
            },
        }
    }

    fn staging(url: String) -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                token: DEFAULT_API_TOKEN.to_string(),
                enable_request_logging: true,
            },
        }
    }

    fn production(url: String) -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                token: DEFAULT_API_TOKEN.to_string(),
                enable_request_logging: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_in_development() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/customers",
        )]))
        .unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api.token, "token2019");
        assert_eq!(config.api.port, 2019);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_unparseable_database_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDatabaseUrl(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://db:5432/app"),
            ("API_TOKEN", "s3cret"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api.token, "s3cret");
        assert_eq!(config.api.port, 8080);
        // unparseable overrides keep the environment default
        assert_eq!(config.database.max_connections, 50);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn test_empty_token_keeps_default() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/customers"),
            ("API_TOKEN", ""),
        ]))
        .unwrap();
        assert_eq!(config.api.token, DEFAULT_API_TOKEN);
    }
}
