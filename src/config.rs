//! Configuration management for the book registry

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Connection string used when `DATABASE_URL` is not set
pub const LOCAL_DATABASE_URL: &str = "sqlite://books.db";

/// Secret used when `SECRET_KEY` is not set
pub const DEFAULT_SECRET_KEY: &str = "change-this-secret-in-production";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Signs the flash cookie
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from defaults, files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let server = ServerConfig::default();
        let database = DatabaseConfig::default();
        let logging = LoggingConfig::default();
        let session = SessionConfig::default();

        let config = Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("database.url", database.url)?
            .set_default("database.max_connections", i64::from(database.max_connections))?
            .set_default("database.min_connections", i64::from(database.min_connections))?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)?
            .set_default("session.secret_key", session.secret_key)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // BOOKS_DATABASE__MAX_CONNECTIONS=20
            .add_source(
                Environment::with_prefix("BOOKS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("session.secret_key", env::var("SECRET_KEY").ok())?
            .set_override_option(
                "server.port",
                env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .map(i64::from),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: LOCAL_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}
