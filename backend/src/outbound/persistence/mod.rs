//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository implements one domain port on top of a shared
//! [`DbPool`]. Row structs (`models.rs`) and the table definitions
//! (`schema.rs`) stay private to this module; adapters translate rows into
//! domain types and map Diesel failures onto the port's error enum.
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use city_guide::outbound::persistence::{DbPool, DieselCatalogueRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/city_guide")).await?;
//! let catalogue = DieselCatalogueRepository::new(pool);
//! # let _ = catalogue;
//! # Ok(())
//! # }
//! ```

mod database_url;
mod diesel_basic_error_mapping;
mod diesel_catalogue_ingestion_repository;
mod diesel_catalogue_repository;
mod diesel_question_repository;
mod diesel_reservation_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod diesel_wishlist_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use database_url::{DATABASE_URL_ENV, resolve_database_url};
pub use diesel_catalogue_ingestion_repository::DieselCatalogueIngestionRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_reservation_repository::DieselReservationRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_wishlist_repository::DieselWishlistRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
