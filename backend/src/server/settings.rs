//! Process settings loaded via OrthoConfig.
//!
//! Every field can be set from the command line, a config file, or a
//! `CITY_GUIDE_*` environment variable.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::CatalogueLimits;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration for the HTTP server process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CITY_GUIDE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Apply embedded migrations at startup. Defaults to on.
    pub run_migrations: Option<bool>,
    /// Cap for the event and location listings.
    pub page_size: Option<usize>,
    /// Cap for the upcoming events feed.
    pub upcoming_limit: Option<usize>,
    /// Shared secret required by the identity sync webhook.
    pub identity_sync_secret: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

/// Settings that could not be turned into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
}

impl ServerSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] for unparsable addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Listing caps, falling back to the catalogue defaults.
    pub fn catalogue_limits(&self) -> CatalogueLimits {
        let defaults = CatalogueLimits::default();
        CatalogueLimits {
            page_size: self.page_size.unwrap_or(defaults.page_size).max(1),
            upcoming_limit: self
                .upcoming_limit
                .unwrap_or(defaults.upcoming_limit)
                .max(1),
        }
    }

    /// Whether embedded migrations run before serving.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool size, defaulting to ten connections.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
