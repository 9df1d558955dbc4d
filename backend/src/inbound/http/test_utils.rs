//! Test helpers for inbound HTTP components.
//!
//! [`TestApp`] wires the real domain services over an [`InMemoryStore`] so
//! handler tests exercise validation, binding, and persistence rules end to
//! end without a database.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use chrono::Duration;

use crate::domain::ports::CatalogueIngestionRepository;
use crate::domain::test_support::{TickingClock, event_starting, location, reference_time};
use crate::domain::{
    CatalogueLimits, Event, EventCategory, EventSubCategory, Location, LocationCategory,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::identity::{AUTH_USER_ID_HEADER, AUTH_USERNAME_HEADER};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryStore;
use crate::server::MemoryRepositories;

/// Catalogue rows inserted by [`TestApp::seeded`].
#[derive(Debug, Clone)]
pub(crate) struct TestCatalogue {
    pub athenaeum: Location,
    pub caru: Location,
    pub control: Location,
    pub jazz: Event,
    pub wine: Event,
    pub past_gig: Event,
}

/// Store, state, and seeded catalogue behind a handler test.
pub(crate) struct TestApp {
    pub store: InMemoryStore,
    pub state: HttpState,
    pub catalogue: TestCatalogue,
}

fn build_catalogue() -> TestCatalogue {
    let athenaeum = location("Romanian Athenaeum", LocationCategory::Cultural);
    let caru = location("Caru' cu Bere", LocationCategory::FoodAndDrink);
    let control = location("Control Club", LocationCategory::Nightlife);
    let jazz = event_starting(
        "Jazz in the Park",
        EventCategory::Events,
        &athenaeum,
        reference_time() + Duration::days(3),
    );
    let mut wine = event_starting(
        "Wine Tasting Evening",
        EventCategory::FoodAndDrink,
        &caru,
        reference_time() + Duration::days(1),
    );
    wine.sub_category = EventSubCategory::Meetup;
    let past_gig = event_starting(
        "Last Winter Gig",
        EventCategory::Nightlife,
        &control,
        reference_time() - Duration::days(30),
    );
    TestCatalogue {
        athenaeum,
        caru,
        control,
        jazz,
        wine,
        past_gig,
    }
}

impl TestApp {
    /// An empty store.
    pub(crate) fn empty() -> Self {
        let store = InMemoryStore::new();
        let state = Self::state_over(&store, CatalogueLimits::default());
        Self {
            store,
            state,
            catalogue: build_catalogue(),
        }
    }

    /// A store holding three locations and three events.
    pub(crate) async fn seeded() -> Self {
        let app = Self::empty();
        let catalogue = &app.catalogue;
        for place in [&catalogue.athenaeum, &catalogue.caru, &catalogue.control] {
            app.store
                .insert_location(place)
                .await
                .expect("seed location");
        }
        for event in [&catalogue.jazz, &catalogue.wine, &catalogue.past_gig] {
            app.store.insert_event(event).await.expect("seed event");
        }
        app
    }

    fn state_over(store: &InMemoryStore, limits: CatalogueLimits) -> HttpState {
        HttpState::new(
            MemoryRepositories::in_memory(store).into_ports(TickingClock::shared(), limits),
        )
    }

    /// Cap listings at `page_size` rows.
    pub(crate) fn with_page_size(mut self, page_size: usize) -> Self {
        let limits = CatalogueLimits {
            page_size,
            ..CatalogueLimits::default()
        };
        self.state = Self::state_over(&self.store, limits);
        self
    }

    /// Require `secret` on the identity sync webhook.
    pub(crate) fn with_sync_secret(mut self, secret: &str) -> Self {
        self.state = self
            .state
            .with_identity_sync_secret(Some(secret.to_owned()));
        self
    }

    /// Application serving the `/api/v1` routes over this state.
    pub(crate) fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api))
    }
}

/// Attach gateway identity headers for `external_id`.
pub(crate) fn signed_in(request: TestRequest, external_id: &str) -> TestRequest {
    request
        .insert_header((AUTH_USER_ID_HEADER, external_id.to_owned()))
        .insert_header((AUTH_USERNAME_HEADER, format!("{external_id}_name")))
}
