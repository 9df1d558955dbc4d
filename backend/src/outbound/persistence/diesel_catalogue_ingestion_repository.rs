//! PostgreSQL-backed catalogue write adapter used by the seeding tool.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{CatalogueIngestionRepository, CatalogueIngestionRepositoryError};
use crate::domain::{Event, Location};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_catalogue_repository::{event_to_row, location_to_row, row_to_location};
use super::models::LocationRow;
use super::pool::{DbPool, PoolError};
use super::schema::{event_reservations, events, locations};

/// Diesel-backed implementation of the catalogue ingestion port.
#[derive(Clone)]
pub struct DieselCatalogueIngestionRepository {
    pool: DbPool,
}

impl DieselCatalogueIngestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueIngestionRepositoryError {
    map_basic_pool_error(error, CatalogueIngestionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueIngestionRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueIngestionRepositoryError::query,
        CatalogueIngestionRepositoryError::connection,
    )
}

#[async_trait]
impl CatalogueIngestionRepository for DieselCatalogueIngestionRepository {
    async fn find_location_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, CatalogueIngestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        locations::table
            .filter(locations::name.eq(name))
            .select(LocationRow::as_select())
            .order_by(locations::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_location)
            .transpose()
            .map_err(CatalogueIngestionRepositoryError::query)
    }

    async fn insert_location(
        &self,
        location: &Location,
    ) -> Result<(), CatalogueIngestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(locations::table)
            .values(&location_to_row(location))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_event(&self, event: &Event) -> Result<(), CatalogueIngestionRepositoryError> {
        let row = event_to_row(event).map_err(CatalogueIngestionRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match diesel::insert_into(events::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) => match constraint_violation(&error) {
                Some(ConstraintViolation::Unique(constraint)) if constraint == "events_title_key" => {
                    Err(CatalogueIngestionRepositoryError::duplicate_title(
                        event.title.clone(),
                    ))
                }
                _ => Err(map_diesel_error(error)),
            },
        }
    }

    async fn clear(&self) -> Result<(), CatalogueIngestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let reservations_removed = diesel::delete(event_reservations::table)
                    .execute(conn)
                    .await?;
                let events_removed = diesel::delete(events::table).execute(conn).await?;
                let locations_removed = diesel::delete(locations::table).execute(conn).await?;
                debug!(
                    reservations_removed,
                    events_removed, locations_removed, "cleared catalogue tables"
                );
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
