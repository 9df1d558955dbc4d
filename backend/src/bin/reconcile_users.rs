//! Delete local users whose identity provider account no longer exists.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use city_guide::domain::ports::IdentityDirectory;
use city_guide::domain::{ReconcileReport, UserReconciler, parse_live_ids};
use city_guide::outbound::identity_directory::{HttpIdentityDirectory, ListedIdentityDirectory};
use city_guide::outbound::persistence::{
    DATABASE_URL_ENV, DbPool, DieselUserRepository, PoolConfig, resolve_database_url,
};
use clap::Parser;
use reqwest::Url;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DIRECTORY_TOKEN_ENV: &str = "IDENTITY_DIRECTORY_TOKEN";

/// `reconcile-users` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reconcile-users",
    about = "Remove local users missing from the identity provider",
    version
)]
struct CliArgs {
    /// File listing live account ids, one per line.
    #[arg(
        long = "live-ids",
        value_name = "path",
        conflicts_with = "directory_url",
        required_unless_present = "directory_url"
    )]
    live_ids: Option<PathBuf>,
    /// Provider user listing endpoint to page through instead of a file.
    #[arg(long = "directory-url", value_name = "url")]
    directory_url: Option<Url>,
    /// Bearer token for the listing. Falls back to `IDENTITY_DIRECTORY_TOKEN`.
    #[arg(long = "directory-token", value_name = "token")]
    directory_token: Option<String>,
    /// Per-request timeout for the listing, in seconds.
    #[arg(long = "timeout-secs", value_name = "seconds", default_value_t = 30)]
    timeout_secs: u64,
    /// Report stale users without deleting them.
    #[arg(long = "dry-run")]
    dry_run: bool,
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
    let database_url = resolve_database_url(args.database_url.clone(), env::var(DATABASE_URL_ENV).ok())?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let users = Arc::new(DieselUserRepository::new(pool));

    let report = match &args.directory_url {
        Some(endpoint) => {
            let token = resolve_token(args.directory_token.clone(), env::var(DIRECTORY_TOKEN_ENV).ok())?;
            let directory = HttpIdentityDirectory::new(
                endpoint.clone(),
                token,
                Duration::from_secs(args.timeout_secs),
            )
            .map_err(|error| io::Error::other(format!("build directory client: {error}")))?;
            run(users, directory, args.dry_run).await?
        }
        None => {
            let directory = load_listed(args.live_ids.as_ref())?;
            run(users, directory, args.dry_run).await?
        }
    };

    for external_id in &report.stale {
        info!(%external_id, dry_run = args.dry_run, "stale user");
    }
    info!(
        live = report.live,
        stored = report.stored,
        stale = report.stale.len(),
        removed = report.removed,
        dry_run = args.dry_run,
        "users reconciled"
    );
    Ok(())
}

async fn run<D: IdentityDirectory>(
    users: Arc<DieselUserRepository>,
    directory: D,
    dry_run: bool,
) -> io::Result<ReconcileReport> {
    UserReconciler::new(users, Arc::new(directory))
        .reconcile(dry_run)
        .await
        .map_err(|error| io::Error::other(format!("reconciliation failed: {error}")))
}

fn load_listed(path: Option<&PathBuf>) -> io::Result<ListedIdentityDirectory> {
    let path = path.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "set --live-ids or --directory-url",
        )
    })?;
    let raw = std::fs::read_to_string(path).map_err(|error| {
        io::Error::other(format!("read live ids '{}': {error}", path.display()))
    })?;
    let ids = parse_live_ids(&raw).map_err(|error| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("live ids '{}': {error}", path.display()),
        )
    })?;
    Ok(ListedIdentityDirectory::new(ids))
}

fn resolve_token(explicit: Option<String>, from_env: Option<String>) -> io::Result<String> {
    explicit
        .or(from_env)
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "directory token missing: set --directory-token or IDENTITY_DIRECTORY_TOKEN",
            )
        })
}
