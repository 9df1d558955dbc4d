//! Catalogue browsing and search.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{CatalogueQuery, CatalogueRepository, CatalogueRepositoryError};
use crate::domain::taxonomy::{search, suggest};
use crate::domain::{
    Error, Event, EventDetails, EventFilter, EventId, Location, LocationId, SUGGESTION_LIMIT,
    SearchQuery, SearchResults, Suggestion,
};

/// Page sizes applied to the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueLimits {
    /// Cap for the general event and location listings.
    pub page_size: usize,
    /// Cap for the upcoming events feed.
    pub upcoming_limit: usize,
}

impl Default for CatalogueLimits {
    fn default() -> Self {
        Self {
            page_size: 20,
            upcoming_limit: 10,
        }
    }
}

pub(crate) fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => Error::service_unavailable(message),
        CatalogueRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Repository-backed [`CatalogueQuery`].
#[derive(Clone)]
pub struct CatalogueService<R> {
    catalogue: Arc<R>,
    clock: Arc<dyn Clock>,
    limits: CatalogueLimits,
}

impl<R> CatalogueService<R> {
    /// Create the service.
    pub fn new(catalogue: Arc<R>, clock: Arc<dyn Clock>, limits: CatalogueLimits) -> Self {
        Self {
            catalogue,
            clock,
            limits,
        }
    }
}

impl<R> CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn locations(
        &self,
        query: &SearchQuery,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, Error> {
        self.catalogue
            .list_locations(query, limit)
            .await
            .map_err(map_catalogue_error)
    }

    async fn events(
        &self,
        filter: &EventFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, Error> {
        self.catalogue
            .list_events(filter, limit)
            .await
            .map_err(map_catalogue_error)
    }
}

#[async_trait]
impl<R> CatalogueQuery for CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn list_events(&self, filter: EventFilter) -> Result<Vec<Event>, Error> {
        self.events(&filter, Some(self.limits.page_size)).await
    }

    async fn upcoming_events(&self) -> Result<Vec<Event>, Error> {
        self.catalogue
            .list_upcoming_events(self.clock.utc(), self.limits.upcoming_limit)
            .await
            .map_err(map_catalogue_error)
    }

    async fn event_details(&self, id: EventId) -> Result<EventDetails, Error> {
        let event = self
            .catalogue
            .find_event(&id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("Event not found"))?;
        let location = self
            .catalogue
            .find_location(&event.location_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "event {} references missing location {}",
                    event.id, event.location_id
                ))
            })?;
        Ok(EventDetails::new(event, &location))
    }

    async fn list_locations(&self, query: SearchQuery) -> Result<Vec<Location>, Error> {
        self.locations(&query, Some(self.limits.page_size)).await
    }

    async fn location(&self, id: LocationId) -> Result<Location, Error> {
        self.catalogue
            .find_location(&id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("Location not found"))
    }

    async fn search(&self, query: SearchQuery) -> Result<SearchResults, Error> {
        let locations = self.locations(&query.for_locations_view(), None).await?;
        let events = self
            .events(&EventFilter::from(query.clone()), None)
            .await?;
        Ok(search(&query, locations, events))
    }

    async fn suggestions(&self, query: SearchQuery) -> Result<Vec<Suggestion>, Error> {
        let cap = Some(SUGGESTION_LIMIT);
        let locations = self.locations(&query, cap).await?;
        let events = self.events(&EventFilter::from(query.clone()), cap).await?;
        Ok(suggest(&query, &locations, &events))
    }
}
