use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connection pool bounds.
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a connection before giving up.
    pub connect_timeout: u64,
    /// Seconds an idle connection may sit in the pool.
    pub idle_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory where uploaded media blobs are written.
    pub media_dir: PathBuf,
    /// Public URL prefix prepended to stored media paths.
    pub public_base: String,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    pub page_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 8)?
            .set_default("database.idle_timeout", 300)?
            .set_default("storage.media_dir", "./media")?
            .set_default("storage.public_base", "http://localhost:3000")?
            .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
            .set_default("pagination.page_size", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PATCHER__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("PATCHER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
