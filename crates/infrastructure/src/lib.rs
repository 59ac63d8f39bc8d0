//! Infrastructure layer - External integrations

pub mod config;
pub mod database;
pub mod memory;
pub mod wire;

pub use config::{AppConfig, ServerConfig, StoreBackend, StoreConfig};
pub use database::{PostgresChecklistRepository, PostgresProductionLogRepository};
pub use memory::InMemoryRowStore;
