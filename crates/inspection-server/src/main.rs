use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::{ChecklistRepository, ProductionLogRepository};
use infrastructure::{
    AppConfig, InMemoryRowStore, PostgresChecklistRepository, PostgresProductionLogRepository,
    StoreBackend,
};

use inspection_server::{api, state::AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and {RUN_MODE}.toml overrides
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the configured API port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            "info,inspection_server=debug",
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("🏭 Quality Inspection API Starting...");

    dotenv::dotenv().ok();
    let config = AppConfig::load(&args.config_dir).context("failed to load configuration")?;

    let (checklists, production): (
        Arc<dyn ChecklistRepository>,
        Arc<dyn ProductionLogRepository>,
    ) = match config.store.backend {
        StoreBackend::Postgres => {
            let database_url = config
                .store
                .database_url
                .clone()
                .or_else(|| std::env::var("DATABASE_URL").ok())
                .context("store.database_url or DATABASE_URL must be set")?;

            info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.store.max_connections)
                .connect(&database_url)
                .await?;

            info!("Running database migrations...");
            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("✅ Migrations applied successfully");

            (
                Arc::new(PostgresChecklistRepository::new(pool.clone())),
                Arc::new(PostgresProductionLogRepository::new(pool)),
            )
        }
        StoreBackend::Memory => {
            info!("Using in-memory row store (rows are lost on shutdown)");
            let store = Arc::new(InMemoryRowStore::new());
            (store.clone(), store)
        }
    };

    let state = Arc::new(AppState::new(checklists, production));

    let app = api::create_router(state);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
