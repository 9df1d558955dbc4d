//! Builders wiring repository adapters into the HTTP state ports.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CatalogueRepository, IdentityBinding, QuestionRepository, ReservationRepository,
    ReviewRepository, UserRepository, WishlistRepository,
};
use crate::domain::{
    CatalogueLimits, CatalogueService, IdentityBinder, IdentitySyncService, QuestionService,
    ReservationService, ReviewService, WishlistService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselQuestionRepository, DieselReservationRepository,
    DieselReviewRepository, DieselUserRepository, DieselWishlistRepository,
};

use super::ServerConfig;

/// One adapter per repository port.
pub struct RepositorySet<U, C, Rs, Rv, W, Q> {
    pub users: Arc<U>,
    pub catalogue: Arc<C>,
    pub reservations: Arc<Rs>,
    pub reviews: Arc<Rv>,
    pub wishlist: Arc<W>,
    pub questions: Arc<Q>,
}

/// Every port served by one shared [`InMemoryStore`].
pub type MemoryRepositories = RepositorySet<
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
    InMemoryStore,
>;

/// Every port served by its Diesel adapter.
pub type PostgresRepositories = RepositorySet<
    DieselUserRepository,
    DieselCatalogueRepository,
    DieselReservationRepository,
    DieselReviewRepository,
    DieselWishlistRepository,
    DieselQuestionRepository,
>;

impl MemoryRepositories {
    /// Share `store` across every port.
    #[must_use]
    pub fn in_memory(store: &InMemoryStore) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            users: Arc::clone(&shared),
            catalogue: Arc::clone(&shared),
            reservations: Arc::clone(&shared),
            reviews: Arc::clone(&shared),
            wishlist: Arc::clone(&shared),
            questions: shared,
        }
    }
}

impl PostgresRepositories {
    /// Diesel adapters sharing `pool`.
    #[must_use]
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
            reservations: Arc::new(DieselReservationRepository::new(pool.clone())),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
            wishlist: Arc::new(DieselWishlistRepository::new(pool.clone())),
            questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
        }
    }
}

impl<U, C, Rs, Rv, W, Q> RepositorySet<U, C, Rs, Rv, W, Q>
where
    U: UserRepository + 'static,
    C: CatalogueRepository + 'static,
    Rs: ReservationRepository + 'static,
    Rv: ReviewRepository + 'static,
    W: WishlistRepository + 'static,
    Q: QuestionRepository + 'static,
{
    /// Build the domain services over these adapters. Every user-scoped
    /// service shares a single identity binder.
    pub fn into_ports(self, clock: Arc<dyn Clock>, limits: CatalogueLimits) -> HttpStatePorts {
        let Self {
            users,
            catalogue,
            reservations,
            reviews,
            wishlist,
            questions,
        } = self;
        let binder: Arc<dyn IdentityBinding> = Arc::new(IdentityBinder::new(Arc::clone(&users)));

        let catalogue_service = Arc::new(CatalogueService::new(
            Arc::clone(&catalogue),
            Arc::clone(&clock),
            limits,
        ));
        let reservation_service = Arc::new(ReservationService::new(
            Arc::clone(&binder),
            reservations,
            catalogue,
            Arc::clone(&clock),
        ));
        let review_service = Arc::new(ReviewService::new(
            Arc::clone(&binder),
            reviews,
            Arc::clone(&clock),
        ));
        let wishlist_service = Arc::new(WishlistService::new(
            Arc::clone(&binder),
            wishlist,
            Arc::clone(&clock),
        ));
        let question_service = Arc::new(QuestionService::new(questions, clock));
        let identity_sync = Arc::new(IdentitySyncService::new(users, binder));

        HttpStatePorts {
            catalogue: catalogue_service,
            reservations: reservation_service.clone(),
            reservations_query: reservation_service,
            reviews: review_service.clone(),
            reviews_query: review_service,
            wishlist: wishlist_service.clone(),
            wishlist_query: wishlist_service,
            questions: question_service.clone(),
            questions_query: question_service,
            identity_sync,
        }
    }
}

/// Build the handler state for `config`: PostgreSQL adapters when a pool is
/// attached, otherwise a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig, clock: Arc<dyn Clock>) -> HttpState {
    let ports = match &config.db_pool {
        Some(pool) => PostgresRepositories::postgres(pool).into_ports(clock, config.limits),
        None => MemoryRepositories::in_memory(&InMemoryStore::new()).into_ports(clock, config.limits),
    };
    HttpState::new(ports).with_identity_sync_secret(config.identity_sync_secret.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExternalIdentity;
    use crate::domain::ports::UserRepository;
    use crate::domain::test_support::TickingClock;

    #[tokio::test]
    async fn memory_ports_share_one_store() {
        let store = InMemoryStore::new();
        let ports = MemoryRepositories::in_memory(&store)
            .into_ports(TickingClock::shared(), CatalogueLimits::default());
        let identity = ExternalIdentity::new("user_shared").expect("identity");

        let listed = ports
            .reservations_query
            .list_reservations(&identity)
            .await
            .expect("listing binds the user");
        assert!(listed.is_empty());

        let stored = store
            .find_by_external_id(identity.external_id())
            .await
            .expect("lookup");
        assert!(stored.is_some());
    }

    #[test]
    fn secret_from_config_reaches_the_state() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("literal address"))
            .with_identity_sync_secret(Some("whsec".to_owned()));
        let state = build_http_state(&config, TickingClock::shared());
        assert_eq!(state.identity_sync_secret(), Some("whsec"));
    }
}
