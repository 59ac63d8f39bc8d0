use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which row-store backend to wire up at startup.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    /// Volatile in-memory store, for demos and local development.
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection string for the Postgres backend. Falls back to the
    /// DATABASE_URL environment variable when unset.
    #[serde(default)]
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("store.backend", "postgres")?
            .set_default("store.max_connections", 5)?
            // Local config file - e.g. config/default.toml
            .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
            // Per-mode overrides - e.g. config/development.toml
            .add_source(File::with_name(&format!("{config_dir}/{run_mode}")).required(false))
            // Environment variables (e.g. INSPECTION__SERVER__PORT=9090)
            .add_source(Environment::with_prefix("INSPECTION").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
