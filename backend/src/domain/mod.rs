//! Domain primitives, aggregates, and services.
//!
//! Purpose: hold the city guide's business rules independent of HTTP and
//! storage. Entities validate their invariants on construction, ports in
//! [`ports`] describe the adapters the domain needs, and the services in
//! this module implement the driving ports over those adapters.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.
//! - Catalogue types (Location, Event) and the taxonomy filter engine.
//! - User, ExternalIdentity, the identity binder, and the user reconciler.
//! - Reviews, wishlist entries, reservations, and FAQ questions.

pub mod catalogue;
pub mod catalogue_seeder;
pub mod catalogue_service;
pub mod category;
pub mod error;
pub mod identity;
pub mod identity_binder;
pub mod identity_sync_service;
pub mod ids;
pub mod ports;
pub mod question;
pub mod question_service;
pub mod reservation;
pub mod reservation_service;
pub mod review;
pub mod review_service;
pub mod target;
pub mod taxonomy;
pub mod trace_id;
pub mod user;
pub mod user_reconciler;
pub mod wishlist;
pub mod wishlist_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::catalogue::{
    CatalogueValidationError, Event, EventDetails, Location, NewEvent, NewLocation,
};
pub use self::catalogue_seeder::{CatalogueSeed, CatalogueSeeder, SeedEvent, SeedReport};
pub use self::catalogue_service::{CatalogueLimits, CatalogueService};
pub use self::category::{
    CategoryFilter, EventCategory, EventSubCategory, LocationCategory, UnknownLabel,
};
pub use self::error::{Error, ErrorCode};
pub use self::identity::{ANONYMOUS_DISPLAY_NAME, ExternalIdentity};
pub use self::identity_binder::IdentityBinder;
pub use self::identity_sync_service::IdentitySyncService;
pub use self::ids::{
    EventId, LocationId, QuestionId, ReservationId, ReviewId, UserId, WishlistEntryId,
};
pub use self::question::{QUESTION_MAX, Question, QuestionDraft, QuestionDraftError};
pub use self::question_service::QuestionService;
pub use self::reservation::{InvalidQuantity, Quantity, ReservationWithEvent, TicketReservation};
pub use self::reservation_service::ReservationService;
pub use self::review::{COMMENT_MAX, RATING_MAX, RATING_MIN, Rating, RatingOutOfRange, Review};
pub use self::review_service::ReviewService;
pub use self::target::{TARGET_ID_MAX, Target, TargetId, TargetIdError, TargetType};
pub use self::taxonomy::{
    EntityKind, EventFilter, SUGGESTION_LIMIT, SearchQuery, SearchResults, Suggestion, TAXONOMY,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ExternalUserId, IDENTIFIER_MAX, User, UserProfile, UserValidationError, Username,
};
pub use self::user_reconciler::{ReconcileReport, UserReconciler, parse_live_ids};
pub use self::wishlist::{WishlistAddOutcome, WishlistEntry};
pub use self::wishlist_service::WishlistService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use city_guide::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Event not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
