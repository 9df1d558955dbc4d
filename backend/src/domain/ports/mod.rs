//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports (`*Command`, `*Query`, [`IdentityBinding`]) are implemented
//! by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_ingestion_repository;
mod catalogue_query;
mod catalogue_repository;
mod identity_binding;
mod identity_directory;
mod identity_sync_command;
mod question_command;
mod question_query;
mod question_repository;
mod reservation_command;
mod reservation_query;
mod reservation_repository;
mod review_command;
mod review_query;
mod review_repository;
mod user_repository;
mod wishlist_command;
mod wishlist_query;
mod wishlist_repository;

#[cfg(test)]
pub use catalogue_ingestion_repository::MockCatalogueIngestionRepository;
pub use catalogue_ingestion_repository::{
    CatalogueIngestionRepository, CatalogueIngestionRepositoryError,
};
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
pub use identity_binding::IdentityBinding;
#[cfg(test)]
pub use identity_binding::MockIdentityBinding;
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use identity_directory::{IdentityDirectory, IdentityDirectoryError};
#[cfg(test)]
pub use identity_sync_command::MockIdentitySyncCommand;
pub use identity_sync_command::{IdentitySyncCommand, IdentitySyncEvent, IdentitySyncOutcome};
#[cfg(test)]
pub use question_command::MockQuestionCommand;
pub use question_command::QuestionCommand;
#[cfg(test)]
pub use question_query::MockQuestionQuery;
pub use question_query::QuestionQuery;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
#[cfg(test)]
pub use reservation_command::MockReservationCommand;
pub use reservation_command::{ReservationCommand, ReserveTicketRequest};
#[cfg(test)]
pub use reservation_query::MockReservationQuery;
pub use reservation_query::ReservationQuery;
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::{ReservationRepository, ReservationRepositoryError};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{ReviewCommand, SubmitReviewRequest};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::ReviewQuery;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use wishlist_command::MockWishlistCommand;
pub use wishlist_command::{WishlistCommand, WishlistRequest};
#[cfg(test)]
pub use wishlist_query::MockWishlistQuery;
pub use wishlist_query::WishlistQuery;
#[cfg(test)]
pub use wishlist_repository::MockWishlistRepository;
pub use wishlist_repository::{WishlistRepository, WishlistRepositoryError};
