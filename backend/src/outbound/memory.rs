//! Process-local store implementing every repository port.
//!
//! Used when no database is configured and by HTTP tests. It enforces the
//! same uniqueness, foreign-key, and cascade rules as the PostgreSQL schema
//! and reports violations with the same port error variants, using the
//! constraint names from the migrations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    CatalogueIngestionRepository, CatalogueIngestionRepositoryError, CatalogueRepository,
    CatalogueRepositoryError, QuestionRepository, QuestionRepositoryError, ReservationRepository,
    ReservationRepositoryError, ReviewRepository, ReviewRepositoryError, UserPersistenceError,
    UserRepository, WishlistRepository, WishlistRepositoryError,
};
use crate::domain::{
    Event, EventFilter, EventId, ExternalUserId, Location, LocationId, Question, Review,
    SearchQuery, Target, TargetId, TargetType, TicketReservation, User, UserId, WishlistEntry,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    locations: Vec<Location>,
    events: Vec<Event>,
    reservations: Vec<TicketReservation>,
    reviews: Vec<Review>,
    wishlist: Vec<WishlistEntry>,
    questions: Vec<Question>,
}

impl MemoryState {
    fn user_conflict(&self, candidate: &User) -> Option<&'static str> {
        let others = self
            .users
            .iter()
            .filter(|user| user.id() != candidate.id());
        for other in others {
            if other.external_id() == candidate.external_id() {
                return Some("users_external_id_key");
            }
            if other.username() == candidate.username() {
                return Some("users_username_key");
            }
            if !candidate.email().is_empty() && other.email() == candidate.email() {
                return Some("users_email_key");
            }
        }
        None
    }

    fn purge_user(&mut self, user_id: UserId) {
        self.reviews.retain(|review| review.user_id != user_id);
        self.wishlist.retain(|entry| entry.user_id != user_id);
        self.reservations
            .retain(|reservation| reservation.user_id != user_id);
    }
}

/// Newest first; rows sharing a timestamp keep reverse insertion order.
fn newest_first<T>(mut rows: Vec<T>, stamp: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.reverse();
    rows.sort_by(|left, right| stamp(right).cmp(&stamp(left)));
    rows
}

fn capped<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Shared in-memory store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.external_id() == external_id)
            .cloned())
    }

    async fn list_external_ids(&self) -> Result<Vec<ExternalUserId>, UserPersistenceError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .map(|user| user.external_id().clone())
            .collect())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.state.write().await;
        if let Some(constraint) = state.user_conflict(user) {
            return Err(UserPersistenceError::duplicate(constraint));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut state = self.state.write().await;
        let Some(index) = state
            .users
            .iter()
            .position(|stored| stored.external_id() == user.external_id())
        else {
            return Ok(false);
        };
        let updated = state.users[index].with_profile(user.profile().clone());
        if let Some(constraint) = state.user_conflict(&updated) {
            return Err(UserPersistenceError::duplicate(constraint));
        }
        state.users[index] = updated;
        Ok(true)
    }

    async fn delete_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.state.write().await;
        let Some(index) = state
            .users
            .iter()
            .position(|user| user.external_id() == external_id)
        else {
            return Ok(false);
        };
        let removed = state.users.remove(index);
        state.purge_user(removed.id());
        Ok(true)
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryStore {
    async fn list_events(
        &self,
        filter: &EventFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Event>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|event| filter.admits(event))
            .cloned()
            .collect();
        events.sort_by(|left, right| right.starts_at.cmp(&left.starts_at));
        Ok(capped(events, limit))
    }

    async fn list_upcoming_events(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|event| event.starts_at >= from)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.starts_at);
        Ok(capped(events, Some(limit)))
    }

    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        Ok(state.events.iter().find(|event| event.id == *id).cloned())
    }

    async fn find_events(&self, ids: &[EventId]) -> Result<Vec<Event>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .events
            .iter()
            .filter(|event| ids.contains(&event.id))
            .cloned()
            .collect())
    }

    async fn list_locations(
        &self,
        query: &SearchQuery,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        let mut locations: Vec<Location> = state
            .locations
            .iter()
            .filter(|location| query.admits(*location))
            .cloned()
            .collect();
        locations.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(capped(locations, limit))
    }

    async fn find_location(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, CatalogueRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .locations
            .iter()
            .find(|location| location.id == *id)
            .cloned())
    }
}

#[async_trait]
impl CatalogueIngestionRepository for InMemoryStore {
    async fn find_location_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, CatalogueIngestionRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .locations
            .iter()
            .find(|location| location.name == name)
            .cloned())
    }

    async fn insert_location(
        &self,
        location: &Location,
    ) -> Result<(), CatalogueIngestionRepositoryError> {
        let mut state = self.state.write().await;
        state.locations.push(location.clone());
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<(), CatalogueIngestionRepositoryError> {
        let mut state = self.state.write().await;
        if state.events.iter().any(|stored| stored.title == event.title) {
            return Err(CatalogueIngestionRepositoryError::duplicate_title(
                event.title.clone(),
            ));
        }
        if !state
            .locations
            .iter()
            .any(|location| location.id == event.location_id)
        {
            return Err(CatalogueIngestionRepositoryError::query(format!(
                "events_location_id_fkey: location {} does not exist",
                event.location_id
            )));
        }
        state.events.push(event.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CatalogueIngestionRepositoryError> {
        let mut state = self.state.write().await;
        state.reservations.clear();
        state.events.clear();
        state.locations.clear();
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn insert(
        &self,
        reservation: &TicketReservation,
    ) -> Result<(), ReservationRepositoryError> {
        let mut state = self.state.write().await;
        if !state
            .events
            .iter()
            .any(|event| event.id == reservation.event_id)
        {
            return Err(ReservationRepositoryError::unknown_event());
        }
        if !state.users.iter().any(|user| user.id() == reservation.user_id) {
            return Err(ReservationRepositoryError::query(
                "event_reservations_user_id_fkey: user does not exist",
            ));
        }
        state.reservations.push(reservation.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TicketReservation>, ReservationRepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .reservations
                .iter()
                .filter(|reservation| reservation.user_id == *user_id)
                .cloned()
                .collect(),
            |reservation| reservation.created_at,
        ))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|user| user.id() == review.user_id) {
            return Err(ReviewRepositoryError::query(
                "reviews_user_id_fkey: user does not exist",
            ));
        }
        state.reviews.push(review.clone());
        Ok(())
    }

    async fn list_for_target(
        &self,
        target_id: &TargetId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .reviews
                .iter()
                .filter(|review| review.target.target_id == *target_id)
                .filter(|review| target_type.is_none_or(|kind| review.target.target_type == kind))
                .cloned()
                .collect(),
            |review| review.created_at,
        ))
    }
}

#[async_trait]
impl WishlistRepository for InMemoryStore {
    async fn find(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<Option<WishlistEntry>, WishlistRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .wishlist
            .iter()
            .find(|entry| entry.user_id == *user_id && entry.target == *target)
            .cloned())
    }

    async fn insert(&self, entry: &WishlistEntry) -> Result<(), WishlistRepositoryError> {
        let mut state = self.state.write().await;
        if state
            .wishlist
            .iter()
            .any(|stored| stored.user_id == entry.user_id && stored.target == entry.target)
        {
            return Err(WishlistRepositoryError::duplicate());
        }
        if !state.users.iter().any(|user| user.id() == entry.user_id) {
            return Err(WishlistRepositoryError::query(
                "wishlist_user_id_fkey: user does not exist",
            ));
        }
        state.wishlist.push(entry.clone());
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<usize, WishlistRepositoryError> {
        let mut state = self.state.write().await;
        let before = state.wishlist.len();
        state
            .wishlist
            .retain(|entry| !(entry.user_id == *user_id && entry.target == *target));
        Ok(before - state.wishlist.len())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .wishlist
                .iter()
                .filter(|entry| entry.user_id == *user_id)
                .filter(|entry| target_type.is_none_or(|kind| entry.target.target_type == kind))
                .cloned()
                .collect(),
            |entry| entry.created_at,
        ))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError> {
        self.state.write().await.questions.push(question.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.questions.clone(),
            |question| question.created_at,
        ))
    }
}
