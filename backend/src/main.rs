//! Backend entry-point: loads settings, prepares storage, and serves HTTP.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use city_guide::inbound::http::health::{HealthState, StoreKind};
use city_guide::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use city_guide::server::{ServerConfig, ServerSettings, create_server};

async fn connect(settings: &ServerSettings, url: &str) -> std::io::Result<DbPool> {
    if settings.run_migrations() {
        let applied = run_pending_migrations(url)
            .await
            .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
        info!(applied, "database schema is current");
    }
    DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool failed: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;

    let (config, store) = match settings.database_url() {
        Some(url) => (config.with_db_pool(connect(&settings, url).await?), StoreKind::Postgres),
        None => {
            warn!("no database configured; using the in-memory store");
            (config, StoreKind::Memory)
        }
    };

    let health_state = web::Data::new(HealthState::new(store));
    let server = create_server(health_state, config)?;
    server.await
}
