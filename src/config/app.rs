//! Process configuration from environment variables (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bikeshare.sqlite";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "bikeshare_api=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Upper bound on request body size, enforced before JSON parsing.
    pub body_limit_bytes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.into(),
                max_connections: 5,
            },
            server: ServerConfig {
                bind_addr: DEFAULT_BIND_ADDR.into(),
                body_limit_bytes: 64 * 1024,
            },
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.into(),
                format: LogFormat::Pretty,
            },
        }
    }
}

impl AppConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
            if config.database.max_connections == 0 {
                return Err(ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: v,
                });
            }
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            config.server.body_limit_bytes = parse("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.log.filter = filter;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            config.log.format = match v.to_lowercase().as_str() {
                "pretty" | "text" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::Invalid { key: "LOG_FORMAT", value: v }),
            };
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://other.db"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("BODY_LIMIT_BYTES", "1024"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.database.url, "sqlite://other.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.body_limit_bytes, 1024);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_bad_numbers_and_formats() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOG_FORMAT", .. }));
    }
}
