//! Driving port for browsing and searching the catalogue.

use async_trait::async_trait;

use crate::domain::{
    Error, Event, EventDetails, EventFilter, EventId, Location, LocationId, SearchQuery,
    SearchResults, Suggestion,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// One page of events admitted by `filter`, latest start first.
    async fn list_events(&self, filter: EventFilter) -> Result<Vec<Event>, Error>;

    /// Events that have not started yet, soonest first.
    async fn upcoming_events(&self) -> Result<Vec<Event>, Error>;

    /// One event with its location's name and coordinates.
    async fn event_details(&self, id: EventId) -> Result<EventDetails, Error>;

    /// One page of locations admitted by `query`, ordered by name.
    async fn list_locations(&self, query: SearchQuery) -> Result<Vec<Location>, Error>;

    /// One location.
    async fn location(&self, id: LocationId) -> Result<Location, Error>;

    /// Uncapped category and text search across the whole catalogue.
    async fn search(&self, query: SearchQuery) -> Result<SearchResults, Error>;

    /// Capped suggestions for live typing.
    async fn suggestions(&self, query: SearchQuery) -> Result<Vec<Suggestion>, Error>;
}
