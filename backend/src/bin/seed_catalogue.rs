//! Load a JSON catalogue fixture into PostgreSQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use city_guide::domain::{CatalogueSeed, CatalogueSeeder};
use city_guide::outbound::persistence::{
    DATABASE_URL_ENV, DbPool, DieselCatalogueIngestionRepository, PoolConfig,
    resolve_database_url, run_pending_migrations,
};
use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `seed-catalogue` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-catalogue",
    about = "Load locations and events from a JSON fixture",
    version
)]
struct CliArgs {
    /// Path to the fixture document.
    #[arg(long = "fixture", value_name = "path")]
    fixture: PathBuf,
    /// Delete every event and location before loading.
    #[arg(long = "reset")]
    reset: bool,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let raw = std::fs::read_to_string(&args.fixture).map_err(|error| {
        io::Error::other(format!(
            "read fixture '{}': {error}",
            args.fixture.display()
        ))
    })?;
    let seed = CatalogueSeed::from_json(&raw).map_err(io::Error::other)?;

    let database_url = resolve_database_url(args.database_url, env::var(DATABASE_URL_ENV).ok())?;
    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    info!(applied, "database schema is current");
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let seeder = CatalogueSeeder::new(
        Arc::new(DieselCatalogueIngestionRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let report = seeder
        .seed(seed, args.reset)
        .await
        .map_err(|error| io::Error::other(format!("seeding failed: {error}")))?;

    info!(
        locations_created = report.locations_created,
        locations_reused = report.locations_reused,
        events_created = report.events_created,
        events_skipped = report.events_skipped,
        reset = args.reset,
        "catalogue seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing.

    use clap::Parser;
    use rstest::rstest;

    use super::CliArgs;

    #[rstest]
    fn reset_defaults_to_off() {
        let args = CliArgs::try_parse_from(["seed-catalogue", "--fixture", "fixtures/bucharest.json"])
            .expect("arguments parse");
        assert!(!args.reset);
        assert!(args.database_url.is_none());
    }

    #[rstest]
    fn fixture_is_required() {
        assert!(CliArgs::try_parse_from(["seed-catalogue", "--reset"]).is_err());
    }
}
