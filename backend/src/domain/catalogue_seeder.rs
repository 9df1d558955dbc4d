//! Loads a JSON catalogue fixture into the store.
//!
//! Reruns are safe: locations are reused by name and events whose title
//! already exists are skipped. Events reference their host by location
//! name, resolved against the fixture first and then the store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::{CatalogueIngestionRepository, CatalogueIngestionRepositoryError};
use crate::domain::{
    Error, EventCategory, EventId, EventSubCategory, Location, LocationId, NewEvent, NewLocation,
};

/// Event entry in a seed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Name of the hosting location.
    pub location: String,
    pub main_category: EventCategory,
    pub sub_category: EventSubCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl SeedEvent {
    fn split(self) -> (String, NewEvent) {
        (
            self.location,
            NewEvent {
                title: self.title,
                description: self.description,
                starts_at: self.starts_at,
                ends_at: self.ends_at,
                main_category: self.main_category,
                sub_category: self.sub_category,
                image_url: self.image_url,
                price: self.price,
                capacity: self.capacity,
            },
        )
    }
}

/// Parsed seed fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogueSeed {
    #[serde(default)]
    pub locations: Vec<NewLocation>,
    #[serde(default)]
    pub events: Vec<SeedEvent>,
}

impl CatalogueSeed {
    /// Parse a fixture document.
    ///
    /// # Errors
    /// Returns [`Error::invalid_request`] when the JSON does not match the
    /// fixture shape.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw)
            .map_err(|err| Error::invalid_request(format!("invalid catalogue fixture: {err}")))
    }
}

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Places inserted by this run.
    pub locations_created: usize,
    /// Places already present under the same name.
    pub locations_reused: usize,
    /// Events inserted by this run.
    pub events_created: usize,
    /// Events whose title already existed.
    pub events_skipped: usize,
}

fn map_ingestion_error(error: CatalogueIngestionRepositoryError) -> Error {
    match error {
        CatalogueIngestionRepositoryError::Connection { message } => {
            Error::service_unavailable(message)
        }
        CatalogueIngestionRepositoryError::Query { message } => Error::internal(message),
        CatalogueIngestionRepositoryError::DuplicateTitle { title } => {
            Error::conflict(format!("an event titled '{title}' already exists"))
        }
    }
}

/// Writes fixtures through a [`CatalogueIngestionRepository`].
#[derive(Clone)]
pub struct CatalogueSeeder<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CatalogueSeeder<R>
where
    R: CatalogueIngestionRepository,
{
    /// Create a seeder.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Seed the store, optionally clearing the catalogue first.
    ///
    /// # Errors
    /// Fails on invalid fixture entries, events naming an unknown
    /// location, and store failures. Entries written before the failure
    /// stay written.
    pub async fn seed(&self, seed: CatalogueSeed, reset: bool) -> Result<SeedReport, Error> {
        if reset {
            self.repo.clear().await.map_err(map_ingestion_error)?;
            info!("cleared existing catalogue");
        }

        let mut report = SeedReport::default();
        let mut hosts: HashMap<String, LocationId> = HashMap::new();
        for draft in seed.locations {
            let location = self.upsert_location(draft, &mut report).await?;
            hosts.insert(location.name, location.id);
        }

        for entry in seed.events {
            let (host_name, draft) = entry.split();
            let location_id = if let Some(id) = hosts.get(&host_name).copied() {
                id
            } else {
                let stored = self
                    .repo
                    .find_location_by_name(&host_name)
                    .await
                    .map_err(map_ingestion_error)?
                    .ok_or_else(|| {
                        Error::invalid_request(format!(
                            "event '{}' references unknown location '{host_name}'",
                            draft.title
                        ))
                    })?;
                hosts.insert(host_name, stored.id);
                stored.id
            };
            let event = draft
                .into_event(EventId::random(), location_id, self.clock.utc())
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            match self.repo.insert_event(&event).await {
                Ok(()) => report.events_created += 1,
                Err(CatalogueIngestionRepositoryError::DuplicateTitle { title }) => {
                    debug!(%title, "event already seeded");
                    report.events_skipped += 1;
                }
                Err(other) => return Err(map_ingestion_error(other)),
            }
        }

        info!(
            locations_created = report.locations_created,
            locations_reused = report.locations_reused,
            events_created = report.events_created,
            events_skipped = report.events_skipped,
            "catalogue seeded"
        );
        Ok(report)
    }

    async fn upsert_location(
        &self,
        draft: NewLocation,
        report: &mut SeedReport,
    ) -> Result<Location, Error> {
        let location = draft
            .into_location(LocationId::random())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if let Some(existing) = self
            .repo
            .find_location_by_name(&location.name)
            .await
            .map_err(map_ingestion_error)?
        {
            report.locations_reused += 1;
            return Ok(existing);
        }
        self.repo
            .insert_location(&location)
            .await
            .map_err(map_ingestion_error)?;
        report.locations_created += 1;
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCatalogueIngestionRepository;
    use crate::domain::test_support::{TickingClock, location};
    use crate::domain::{EventFilter, LocationCategory};
    use rstest::{fixture, rstest};

    const FIXTURE: &str = r#"{
        "locations": [
            {
                "name": "Herastrau Park",
                "address": "Bulevardul Aviatorilor",
                "latitude": "44.4672",
                "longitude": "26.0824",
                "category": "activities"
            }
        ],
        "events": [
            {
                "title": "Jazz in the Park",
                "startsAt": "2024-06-15T18:00:00Z",
                "endsAt": "2024-06-15T23:00:00Z",
                "location": "Herastrau Park",
                "mainCategory": "events",
                "subCategory": "festival",
                "price": "0",
                "capacity": 5000
            }
        ]
    }"#;

    #[fixture]
    fn seed() -> CatalogueSeed {
        CatalogueSeed::from_json(FIXTURE).expect("fixture parses")
    }

    #[rstest]
    #[tokio::test]
    async fn fresh_store_receives_everything(seed: CatalogueSeed) {
        let mut repo = MockCatalogueIngestionRepository::new();
        repo.expect_clear().never();
        repo.expect_find_location_by_name()
            .returning(|_| Ok(None));
        repo.expect_insert_location().times(1).returning(|_| Ok(()));
        repo.expect_insert_event()
            .withf(|event| event.capacity == Some(5000) && event.is_free())
            .times(1)
            .returning(|_| Ok(()));

        let seeder = CatalogueSeeder::new(Arc::new(repo), TickingClock::shared());
        let report = seeder.seed(seed, false).await.expect("seeded");
        assert_eq!(report.locations_created, 1);
        assert_eq!(report.events_created, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn rerun_reuses_locations_and_skips_titles(seed: CatalogueSeed) {
        let park = location("Herastrau Park", LocationCategory::Activities);
        let park_id = park.id;
        let mut repo = MockCatalogueIngestionRepository::new();
        repo.expect_find_location_by_name()
            .returning(move |_| Ok(Some(park.clone())));
        repo.expect_insert_location().never();
        repo.expect_insert_event()
            .withf(move |event| event.location_id == park_id)
            .returning(|event| {
                Err(CatalogueIngestionRepositoryError::duplicate_title(
                    event.title.clone(),
                ))
            });

        let seeder = CatalogueSeeder::new(Arc::new(repo), TickingClock::shared());
        let report = seeder.seed(seed, false).await.expect("seeded");
        assert_eq!(
            report,
            SeedReport {
                locations_created: 0,
                locations_reused: 1,
                events_created: 0,
                events_skipped: 1,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn reset_clears_before_writing(seed: CatalogueSeed) {
        let mut seq = mockall::Sequence::new();
        let mut repo = MockCatalogueIngestionRepository::new();
        repo.expect_clear()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        repo.expect_find_location_by_name()
            .returning(|_| Ok(None));
        repo.expect_insert_location().returning(|_| Ok(()));
        repo.expect_insert_event().returning(|_| Ok(()));

        let seeder = CatalogueSeeder::new(Arc::new(repo), TickingClock::shared());
        seeder.seed(seed, true).await.expect("seeded");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_host_is_rejected(mut seed: CatalogueSeed) {
        seed.locations.clear();
        let mut repo = MockCatalogueIngestionRepository::new();
        repo.expect_find_location_by_name()
            .returning(|_| Ok(None));
        repo.expect_insert_event().never();

        let seeder = CatalogueSeeder::new(Arc::new(repo), TickingClock::shared());
        let err = seeder.seed(seed, false).await.expect_err("unknown host");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("Herastrau Park"));
    }

    #[tokio::test]
    async fn shipped_fixture_seeds_the_memory_store_once() {
        use crate::domain::ports::CatalogueRepository;
        use crate::outbound::memory::InMemoryStore;

        let raw = include_str!("../../fixtures/bucharest.json");
        let store = InMemoryStore::new();
        let seeder = CatalogueSeeder::new(Arc::new(store.clone()), TickingClock::shared());

        let first = seeder
            .seed(CatalogueSeed::from_json(raw).expect("fixture parses"), false)
            .await
            .expect("first run");
        assert_eq!(first.locations_created, 4);
        assert_eq!(first.events_created, 3);

        let second = seeder
            .seed(CatalogueSeed::from_json(raw).expect("fixture parses"), false)
            .await
            .expect("second run");
        assert_eq!(second.locations_reused, 4);
        assert_eq!(second.events_skipped, 3);

        let events = store
            .list_events(&EventFilter::default(), None)
            .await
            .expect("events");
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn malformed_fixtures_are_invalid_requests() {
        let err = CatalogueSeed::from_json("{\"locations\": 3}").expect_err("bad shape");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
