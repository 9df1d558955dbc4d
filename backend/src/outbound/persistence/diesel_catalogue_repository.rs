//! PostgreSQL-backed catalogue read adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Event, EventFilter, EventId, Location, LocationId, SearchQuery};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EventRow, LocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, locations};

/// Diesel-backed implementation of the catalogue read port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/city_guide")).await?;
    /// let repo = DieselCatalogueRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_basic_pool_error(error, CatalogueRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

// ---------------------------------------------------------------------------
// Row-to-domain converters
// ---------------------------------------------------------------------------

pub(super) fn row_to_location(row: LocationRow) -> Result<Location, String> {
    Ok(Location {
        id: LocationId::from_uuid(row.id),
        category: row.category.parse().map_err(|err| format!("{err}"))?,
        name: row.name,
        description: row.description,
        address: row.address,
        latitude: row.latitude,
        longitude: row.longitude,
        image_url: row.image_url,
    })
}

pub(super) fn row_to_event(row: EventRow) -> Result<Event, String> {
    let capacity = row
        .capacity
        .map(u32::try_from)
        .transpose()
        .map_err(|_| format!("event {} has a negative capacity", row.id))?;
    Ok(Event {
        id: EventId::from_uuid(row.id),
        main_category: row.main_category.parse().map_err(|err| format!("{err}"))?,
        sub_category: row.sub_category.parse().map_err(|err| format!("{err}"))?,
        title: row.title,
        description: row.description,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        location_id: LocationId::from_uuid(row.location_id),
        image_url: row.image_url,
        price: row.price,
        capacity,
        created_at: row.created_at,
    })
}

pub(super) fn location_to_row(location: &Location) -> LocationRow {
    LocationRow {
        id: *location.id.as_uuid(),
        name: location.name.clone(),
        description: location.description.clone(),
        address: location.address.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        image_url: location.image_url.clone(),
        category: location.category.as_str().to_owned(),
    }
}

pub(super) fn event_to_row(event: &Event) -> Result<EventRow, String> {
    let capacity = event
        .capacity
        .map(i32::try_from)
        .transpose()
        .map_err(|_| format!("event '{}' capacity exceeds the column range", event.title))?;
    Ok(EventRow {
        id: *event.id.as_uuid(),
        title: event.title.clone(),
        description: event.description.clone(),
        starts_at: event.starts_at,
        ends_at: event.ends_at,
        location_id: *event.location_id.as_uuid(),
        main_category: event.main_category.as_str().to_owned(),
        sub_category: event.sub_category.as_str().to_owned(),
        image_url: event.image_url.clone(),
        price: event.price,
        capacity,
        created_at: event.created_at,
    })
}

fn convert_all<R, T>(
    rows: Vec<R>,
    convert: fn(R) -> Result<T, String>,
) -> Result<Vec<T>, CatalogueRepositoryError> {
    rows.into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CatalogueRepositoryError::query)
}

fn as_sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in the term
/// taken literally.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ---------------------------------------------------------------------------
// Trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_events(
        &self,
        filter: &EventFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = events::table
            .select(EventRow::as_select())
            .order_by((events::starts_at.desc(), events::title))
            .into_boxed();
        if let Some(labels) = filter.query.category_labels::<Event>() {
            query = query.filter(events::main_category.eq_any(labels));
        }
        if let Some(term) = filter.query.text_term() {
            query = query.filter(events::title.ilike(contains_pattern(term)));
        }
        if let Some(sub_category) = filter.sub_category {
            query = query.filter(events::sub_category.eq(sub_category.as_str()));
        }
        if let Some(limit) = limit {
            query = query.limit(as_sql_limit(limit));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        convert_all(rows, row_to_event)
    }

    async fn list_upcoming_events(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = events::table
            .filter(events::starts_at.ge(from))
            .select(EventRow::as_select())
            .order_by((events::starts_at.asc(), events::title))
            .limit(as_sql_limit(limit))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_all(rows, row_to_event)
    }

    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = events::table
            .find(*id.as_uuid())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_event)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_events(&self, ids: &[EventId]) -> Result<Vec<Event>, CatalogueRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = events::table
            .filter(events::id.eq_any(uuids))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        convert_all(rows, row_to_event)
    }

    async fn list_locations(
        &self,
        filter: &SearchQuery,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = locations::table
            .select(LocationRow::as_select())
            .order_by((locations::name, locations::id))
            .into_boxed();
        if let Some(labels) = filter.category_labels::<Location>() {
            query = query.filter(locations::category.eq_any(labels));
        }
        if let Some(term) = filter.text_term() {
            query = query.filter(locations::name.ilike(contains_pattern(term)));
        }
        if let Some(limit) = limit {
            query = query.limit(as_sql_limit(limit));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        convert_all(rows, row_to_location)
    }

    async fn find_location(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = locations::table
            .find(*id.as_uuid())
            .select(LocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_location)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }
}
