//! Ticket reservations.
//!
//! Capacity is informational; purchases are recorded without checking
//! how many seats remain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::catalogue_service::map_catalogue_error;
use crate::domain::ports::{
    CatalogueRepository, IdentityBinding, ReservationCommand, ReservationQuery,
    ReservationRepository, ReservationRepositoryError, ReserveTicketRequest,
};
use crate::domain::{
    Error, EventId, ExternalIdentity, ReservationId, ReservationWithEvent, TicketReservation,
};

fn map_reservation_error(error: ReservationRepositoryError) -> Error {
    match error {
        ReservationRepositoryError::Connection { message } => Error::service_unavailable(message),
        ReservationRepositoryError::Query { message } => Error::internal(message),
        ReservationRepositoryError::UnknownEvent => Error::not_found("Event not found"),
    }
}

/// Repository-backed reservation command and query.
#[derive(Clone)]
pub struct ReservationService<R, C> {
    binder: Arc<dyn IdentityBinding>,
    reservations: Arc<R>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> ReservationService<R, C> {
    /// Create the service.
    pub fn new(
        binder: Arc<dyn IdentityBinding>,
        reservations: Arc<R>,
        catalogue: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            binder,
            reservations,
            catalogue,
            clock,
        }
    }
}

#[async_trait]
impl<R, C> ReservationCommand for ReservationService<R, C>
where
    R: ReservationRepository,
    C: CatalogueRepository,
{
    async fn reserve(&self, request: ReserveTicketRequest) -> Result<ReservationWithEvent, Error> {
        let user = self.binder.bind(&request.identity).await?;
        let event = self
            .catalogue
            .find_event(&request.event_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("Event not found"))?;

        let reservation = TicketReservation {
            id: ReservationId::random(),
            user_id: user.id(),
            event_id: event.id,
            quantity: request.quantity,
            created_at: self.clock.utc(),
        };
        self.reservations
            .insert(&reservation)
            .await
            .map_err(map_reservation_error)?;
        info!(
            user_id = %user.id(),
            event_id = %event.id,
            quantity = reservation.quantity.get(),
            "recorded ticket reservation"
        );
        Ok(ReservationWithEvent { reservation, event })
    }
}

#[async_trait]
impl<R, C> ReservationQuery for ReservationService<R, C>
where
    R: ReservationRepository,
    C: CatalogueRepository,
{
    async fn list_reservations(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<Vec<ReservationWithEvent>, Error> {
        let user = self.binder.bind(identity).await?;
        let reservations = self
            .reservations
            .list_for_user(&user.id())
            .await
            .map_err(map_reservation_error)?;
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<EventId> = reservations.iter().map(|r| r.event_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let events: HashMap<EventId, _> = self
            .catalogue
            .find_events(&ids)
            .await
            .map_err(map_catalogue_error)?
            .into_iter()
            .map(|event| (event.id, event))
            .collect();

        // Rows whose event vanished between the two reads are dropped.
        Ok(reservations
            .into_iter()
            .filter_map(|reservation| {
                let event = events.get(&reservation.event_id)?.clone();
                Some(ReservationWithEvent { reservation, event })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCatalogueRepository, MockIdentityBinding, MockReservationRepository,
    };
    use crate::domain::test_support::{TickingClock, event, identity, location, reference_time};
    use crate::domain::{ErrorCode, EventCategory, LocationCategory, Quantity, User, UserId};

    fn binder_for(user: User) -> MockIdentityBinding {
        let mut binder = MockIdentityBinding::new();
        binder.expect_bind().returning(move |_| Ok(user.clone()));
        binder
    }

    fn caller() -> User {
        let identity = identity("ext-buyer");
        User::new(UserId::random(), identity.external_id().clone(), identity.profile())
    }

    fn request(event_id: EventId, quantity: i64) -> ReserveTicketRequest {
        ReserveTicketRequest {
            identity: identity("ext-buyer"),
            event_id,
            quantity: Quantity::new(quantity).expect("valid quantity"),
        }
    }

    #[tokio::test]
    async fn reserve_records_the_purchase_with_its_event() {
        let user = caller();
        let user_id = user.id();
        let host = location("Romanian Athenaeum", LocationCategory::Cultural);
        let concert = event("Enescu Night", EventCategory::Culture, &host);
        let concert_id = concert.id;

        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_event()
            .return_once(move |_| Ok(Some(concert)));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_insert()
            .withf(move |r| r.user_id == user_id && r.quantity.get() == 3)
            .times(1)
            .return_once(|_| Ok(()));

        let service = ReservationService::new(
            Arc::new(binder_for(user)),
            Arc::new(reservations),
            Arc::new(catalogue),
            TickingClock::shared(),
        );
        let stored = service
            .reserve(request(concert_id, 3))
            .await
            .expect("reserved");
        assert_eq!(stored.event.id, concert_id);
        assert_eq!(stored.reservation.created_at, reference_time());
    }

    #[tokio::test]
    async fn reserving_an_unknown_event_is_not_found() {
        let mut catalogue = MockCatalogueRepository::new();
        catalogue.expect_find_event().return_once(|_| Ok(None));
        let mut reservations = MockReservationRepository::new();
        reservations.expect_insert().never();

        let service = ReservationService::new(
            Arc::new(binder_for(caller())),
            Arc::new(reservations),
            Arc::new(catalogue),
            TickingClock::shared(),
        );
        let err = service
            .reserve(request(EventId::random(), 1))
            .await
            .expect_err("unknown event");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Event not found");
    }

    #[tokio::test]
    async fn an_event_deleted_between_lookup_and_insert_is_not_found() {
        let host = location("Old Town", LocationCategory::Nightlife);
        let party = event("Lipscani Crawl", EventCategory::Nightlife, &host);
        let party_id = party.id;
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_event()
            .return_once(move |_| Ok(Some(party)));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_insert()
            .return_once(|_| Err(ReservationRepositoryError::unknown_event()));

        let service = ReservationService::new(
            Arc::new(binder_for(caller())),
            Arc::new(reservations),
            Arc::new(catalogue),
            TickingClock::shared(),
        );
        let err = service
            .reserve(request(party_id, 1))
            .await
            .expect_err("race lost");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_joins_each_reservation_with_its_event() {
        let user = caller();
        let user_id = user.id();
        let host = location("Herastrau Park", LocationCategory::Activities);
        let jazz = event("Jazz in the Park", EventCategory::Events, &host);
        let jazz_id = jazz.id;
        let rows = vec![
            TicketReservation {
                id: ReservationId::random(),
                user_id,
                event_id: jazz_id,
                quantity: Quantity::new(2).expect("valid"),
                created_at: reference_time(),
            },
            TicketReservation {
                id: ReservationId::random(),
                user_id,
                event_id: jazz_id,
                quantity: Quantity::default(),
                created_at: reference_time(),
            },
        ];

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_list_for_user()
            .return_once(move |_| Ok(rows));
        let mut catalogue = MockCatalogueRepository::new();
        catalogue
            .expect_find_events()
            .withf(move |ids| ids.to_vec() == vec![jazz_id])
            .return_once(move |_| Ok(vec![jazz]));

        let service = ReservationService::new(
            Arc::new(binder_for(user)),
            Arc::new(reservations),
            Arc::new(catalogue),
            TickingClock::shared(),
        );
        let listed = service
            .list_reservations(&identity("ext-buyer"))
            .await
            .expect("listed");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|row| row.event.title == "Jazz in the Park"));
    }

    #[tokio::test]
    async fn empty_history_skips_the_event_lookup() {
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_list_for_user()
            .return_once(|_| Ok(Vec::new()));
        let mut catalogue = MockCatalogueRepository::new();
        catalogue.expect_find_events().never();

        let service = ReservationService::new(
            Arc::new(binder_for(caller())),
            Arc::new(reservations),
            Arc::new(catalogue),
            TickingClock::shared(),
        );
        let listed = service
            .list_reservations(&identity("ext-buyer"))
            .await
            .expect("listed");
        assert!(listed.is_empty());
    }
}
