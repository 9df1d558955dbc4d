//! Locations and events: the browsable catalogue.
//!
//! Catalogue records are written by seeding and read by everyone else. The
//! `New*` drafts carry the creation-time checks; once stored, entities are
//! treated as immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::{EventCategory, EventSubCategory, LocationCategory};
use super::ids::{EventId, LocationId};

/// Upper bound on latitude magnitude.
const MAX_LATITUDE: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
/// Upper bound on longitude magnitude.
const MAX_LONGITUDE: Decimal = Decimal::from_parts(180, 0, 0, false, 0);

/// A place in the city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub image_url: Option<String>,
    pub category: LocationCategory,
}

/// A dated happening hosted at a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location_id: LocationId,
    pub main_category: EventCategory,
    pub sub_category: EventSubCategory,
    pub image_url: Option<String>,
    /// Ticket price; zero means free entry.
    pub price: Decimal,
    /// Advertised capacity. Informational only.
    pub capacity: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether entry is free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// An event joined with the location fields shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub event: Event,
    pub location_name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl EventDetails {
    /// Join an event with its host location.
    #[must_use]
    pub fn new(event: Event, location: &Location) -> Self {
        Self {
            event,
            location_name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Reasons a catalogue draft is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(Decimal),
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(Decimal),
    #[error("event '{title}' ends before it starts")]
    EndsBeforeStart { title: String },
    #[error("event '{title}' has a negative price")]
    NegativePrice { title: String },
}

fn require_text(value: &str, field: &'static str) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogueValidationError::EmptyField { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Unvalidated location input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: LocationCategory,
}

impl NewLocation {
    /// Validate and assign an identifier.
    ///
    /// # Errors
    /// Rejects blank names or addresses and coordinates outside the globe.
    pub fn into_location(self, id: LocationId) -> Result<Location, CatalogueValidationError> {
        let name = require_text(&self.name, "name")?;
        let address = require_text(&self.address, "address")?;
        if self.latitude.abs() > MAX_LATITUDE {
            return Err(CatalogueValidationError::LatitudeOutOfRange(self.latitude));
        }
        if self.longitude.abs() > MAX_LONGITUDE {
            return Err(CatalogueValidationError::LongitudeOutOfRange(
                self.longitude,
            ));
        }
        Ok(Location {
            id,
            name,
            description: optional_text(self.description),
            address,
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: optional_text(self.image_url),
            category: self.category,
        })
    }
}

/// Unvalidated event input; the host location is resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub main_category: EventCategory,
    pub sub_category: EventSubCategory,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub capacity: Option<u32>,
}

impl NewEvent {
    /// Validate and attach identity, host, and creation time.
    ///
    /// # Errors
    /// Rejects blank titles, inverted time ranges, and negative prices.
    pub fn into_event(
        self,
        id: EventId,
        location_id: LocationId,
        created_at: DateTime<Utc>,
    ) -> Result<Event, CatalogueValidationError> {
        let title = require_text(&self.title, "title")?;
        if self.ends_at < self.starts_at {
            return Err(CatalogueValidationError::EndsBeforeStart { title });
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CatalogueValidationError::NegativePrice { title });
        }
        Ok(Event {
            id,
            title,
            description: optional_text(self.description),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            location_id,
            main_category: self.main_category,
            sub_category: self.sub_category,
            image_url: optional_text(self.image_url),
            price: self.price,
            capacity: self.capacity,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn location_draft() -> NewLocation {
        NewLocation {
            name: "  Romanian Athenaeum ".to_owned(),
            description: Some(String::new()),
            address: "Strada Benjamin Franklin 1-3".to_owned(),
            latitude: Decimal::new(444_414, 4),
            longitude: Decimal::new(260_970, 4),
            image_url: None,
            category: LocationCategory::Cultural,
        }
    }

    #[fixture]
    fn event_draft() -> NewEvent {
        NewEvent {
            title: "Jazz in the Park".to_owned(),
            description: None,
            starts_at: Utc.with_ymd_and_hms(2024, 5, 15, 19, 0, 0).single().expect("time"),
            ends_at: Utc.with_ymd_and_hms(2024, 5, 15, 23, 0, 0).single().expect("time"),
            main_category: EventCategory::Events,
            sub_category: EventSubCategory::Festival,
            image_url: None,
            price: Decimal::ZERO,
            capacity: Some(5000),
        }
    }

    #[rstest]
    fn location_draft_is_trimmed(location_draft: NewLocation) {
        let location = location_draft
            .into_location(LocationId::random())
            .expect("valid location");
        assert_eq!(location.name, "Romanian Athenaeum");
        assert_eq!(location.description, None);
    }

    #[rstest]
    fn latitude_beyond_pole_is_rejected(mut location_draft: NewLocation) {
        location_draft.latitude = Decimal::new(905, 1);
        let err = location_draft
            .into_location(LocationId::random())
            .expect_err("latitude out of range");
        assert!(matches!(err, CatalogueValidationError::LatitudeOutOfRange(_)));
    }

    #[rstest]
    fn event_may_start_and_end_at_the_same_instant(mut event_draft: NewEvent) {
        event_draft.ends_at = event_draft.starts_at;
        let event = event_draft
            .into_event(EventId::random(), LocationId::random(), Utc::now())
            .expect("zero-length event is allowed");
        assert!(event.is_free());
    }

    #[rstest]
    fn inverted_time_range_is_rejected(mut event_draft: NewEvent) {
        event_draft.ends_at = event_draft.starts_at - chrono::Duration::minutes(1);
        let err = event_draft
            .into_event(EventId::random(), LocationId::random(), Utc::now())
            .expect_err("end before start");
        assert_eq!(
            err,
            CatalogueValidationError::EndsBeforeStart {
                title: "Jazz in the Park".to_owned()
            }
        );
    }

    #[rstest]
    fn negative_price_is_rejected(mut event_draft: NewEvent) {
        event_draft.price = Decimal::new(-1, 2);
        assert!(matches!(
            event_draft.into_event(EventId::random(), LocationId::random(), Utc::now()),
            Err(CatalogueValidationError::NegativePrice { .. })
        ));
    }
}
