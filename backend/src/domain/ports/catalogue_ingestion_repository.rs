//! Port abstraction for catalogue writes performed by seeding tools.

use async_trait::async_trait;

use crate::domain::{Event, Location};

use super::define_port_error;

define_port_error! {
    /// Errors raised when writing catalogue data.
    pub enum CatalogueIngestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue ingestion connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue ingestion query failed: {message}",
        /// An event with the same title already exists.
        DuplicateTitle { title: String } =>
            "an event titled '{title}' already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueIngestionRepository: Send + Sync {
    /// Find a location by exact name so reseeding reuses it.
    async fn find_location_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, CatalogueIngestionRepositoryError>;

    /// Store a location.
    async fn insert_location(
        &self,
        location: &Location,
    ) -> Result<(), CatalogueIngestionRepositoryError>;

    /// Store an event; titles are unique.
    async fn insert_event(&self, event: &Event) -> Result<(), CatalogueIngestionRepositoryError>;

    /// Delete every event and location. Reservations on deleted events go
    /// with them.
    async fn clear(&self) -> Result<(), CatalogueIngestionRepositoryError>;
}
