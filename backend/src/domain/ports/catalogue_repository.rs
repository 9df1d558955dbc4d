//! Port abstraction for catalogue reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Event, EventFilter, EventId, Location, LocationId, SearchQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading catalogue data.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "catalogue read connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "catalogue read query failed: {message}",
    }
}

/// Read access to locations and events.
///
/// Listings apply their filter before `limit`; `limit = None` returns every
/// match. Filters follow the taxonomy predicates exactly, so adapters that
/// translate them into a query language use
/// [`SearchQuery::category_labels`] and [`SearchQuery::text_term`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Events admitted by `filter`, ordered by start time, latest first.
    async fn list_events(
        &self,
        filter: &EventFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, CatalogueRepositoryError>;

    /// Events starting at or after `from`, soonest first.
    async fn list_upcoming_events(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, CatalogueRepositoryError>;

    /// One event.
    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, CatalogueRepositoryError>;

    /// Every event whose id is listed; unknown ids are skipped.
    async fn find_events(&self, ids: &[EventId]) -> Result<Vec<Event>, CatalogueRepositoryError>;

    /// Locations admitted by `query`, ordered by name.
    async fn list_locations(
        &self,
        query: &SearchQuery,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, CatalogueRepositoryError>;

    /// One location.
    async fn find_location(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, CatalogueRepositoryError>;
}
