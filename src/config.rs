use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// `PACKING_` prefix, `__` between nesting levels so keys may contain `_`,
/// e.g. `PACKING_DATABASE__MAX_CONNECTIONS=4`.
fn environment() -> Environment {
    Environment::with_prefix("PACKING")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Layered configuration: `config/default`, `config/{RUN_MODE}`, `config/local`,
    /// then `PACKING_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://packing_assistant.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_max_connections);

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::Message(format!("SERVER_PORT is not a valid port: {}", e)))?;

        Ok(Config {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
        })
    }

    /// In-memory SQLite, used by the test suites.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Config {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_uses_a_single_connection() {
        let config = Config::in_memory();
        assert_eq!(config.database.max_connections, 1);
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn environment_overrides_nested_keys_with_underscores() {
        let vars: config::Map<String, String> = [
            ("PACKING_DATABASE__URL", "sqlite://trips.db"),
            ("PACKING_DATABASE__MAX_CONNECTIONS", "4"),
            ("PACKING_SERVER__HOST", "0.0.0.0"),
            ("PACKING_SERVER__PORT", "9000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: Config = ConfigBuilder::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.url, "sqlite://trips.db");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }
}
