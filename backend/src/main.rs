use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use fuel_center::app;
use fuel_center::config::{AppConfig, StoreBackend};
use fuel_center::logging::{init_logging, LoggingConfig};
use fuel_center::models::DashboardState;
use fuel_center::services::dashboard_service;
use fuel_center::state::AppState;
use fuel_center::store::{MemorySaleStore, PgSaleStore, SaleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env().map_err(|e| anyhow!(e))?;

    let store: Arc<dyn SaleStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to Postgres")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("🗄️ Using Postgres sale store");
            Arc::new(PgSaleStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::info!("🗄️ Using in-memory sale store");
            Arc::new(MemorySaleStore::new())
        }
    };

    let initial = DashboardState::new(Utc::now().date_naive(), config.default_rate_per_liter);
    let dashboard = dashboard_service::load(store.as_ref(), initial).await;
    let state = AppState::new(store, dashboard);
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("🚀 Fuel center backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
