//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::domain::CatalogueLimits;
use crate::outbound::persistence::DbPool;

use super::settings::{ServerSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) limits: CatalogueLimits,
    pub(crate) identity_sync_secret: Option<String>,
}

impl ServerConfig {
    /// In-memory configuration bound to `bind_addr` with default limits.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            limits: CatalogueLimits::default(),
            identity_sync_secret: None,
        }
    }

    /// Build a configuration from loaded settings. The pool is attached
    /// separately because creating it needs the async runtime.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the bind address does not parse.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?)
            .with_limits(settings.catalogue_limits())
            .with_identity_sync_secret(settings.identity_sync_secret.clone()))
    }

    /// Attach a database connection pool. Every repository port then uses
    /// its PostgreSQL adapter instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: CatalogueLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_identity_sync_secret(mut self, secret: Option<String>) -> Self {
        self.identity_sync_secret = secret;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether a database pool is attached.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        self.db_pool.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_configuration_uses_memory_and_default_limits() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal address");
        let config = ServerConfig::new(addr);
        assert_eq!(config.bind_addr(), addr);
        assert!(!config.uses_database());
        assert_eq!(config.limits, CatalogueLimits::default());
    }

    #[test]
    fn settings_flow_into_the_configuration() {
        let settings = ServerSettings {
            bind_addr: Some("127.0.0.1:7000".to_owned()),
            database_url: None,
            run_migrations: Some(false),
            page_size: Some(3),
            upcoming_limit: Some(2),
            identity_sync_secret: Some("whsec".to_owned()),
            pool_max_size: None,
        };
        let config = ServerConfig::from_settings(&settings).expect("valid settings");
        assert_eq!(config.bind_addr().port(), 7000);
        assert_eq!(
            config.limits,
            CatalogueLimits {
                page_size: 3,
                upcoming_limit: 2
            }
        );
        assert_eq!(config.identity_sync_secret.as_deref(), Some("whsec"));
    }
}
