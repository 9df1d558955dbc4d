//! Builders shared by domain unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use super::catalogue::{Event, Location};
use super::category::{EventCategory, EventSubCategory, LocationCategory};
use super::ids::{EventId, LocationId};
use super::identity::ExternalIdentity;

/// Fixed reference instant used across tests.
pub(crate) fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid reference time")
}

/// Clock that advances one second on every read.
pub(crate) struct TickingClock {
    seconds: AtomicI64,
}

impl TickingClock {
    pub(crate) fn shared() -> Arc<dyn Clock> {
        Arc::new(Self {
            seconds: AtomicI64::new(0),
        })
    }
}

impl Clock for TickingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let offset = self.seconds.fetch_add(1, Ordering::SeqCst);
        reference_time() + Duration::seconds(offset)
    }
}

pub(crate) fn location(name: &str, category: LocationCategory) -> Location {
    Location {
        id: LocationId::random(),
        name: name.to_owned(),
        description: None,
        address: format!("{name} street 1"),
        latitude: Decimal::new(444_268, 4),
        longitude: Decimal::new(260_873, 4),
        image_url: None,
        category,
    }
}

pub(crate) fn event(title: &str, category: EventCategory, host: &Location) -> Event {
    event_starting(title, category, host, reference_time())
}

pub(crate) fn event_starting(
    title: &str,
    category: EventCategory,
    host: &Location,
    starts_at: DateTime<Utc>,
) -> Event {
    Event {
        id: EventId::random(),
        title: title.to_owned(),
        description: None,
        starts_at,
        ends_at: starts_at + Duration::hours(2),
        location_id: host.id,
        main_category: category,
        sub_category: EventSubCategory::Concert,
        image_url: None,
        price: Decimal::new(2500, 2),
        capacity: Some(100),
        created_at: reference_time(),
    }
}

pub(crate) fn identity(external_id: &str) -> ExternalIdentity {
    ExternalIdentity::new(external_id).expect("valid external id")
}
