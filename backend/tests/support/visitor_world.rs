//! Shared world for visitor journey scenarios.
//!
//! The world owns an Actix system runner and an in-memory store seeded from
//! the shipped Bucharest fixture. Each request builds the application over
//! the same store, so state carries across steps.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use actix_rt::{System, SystemRunner};
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use city_guide::Trace;
use city_guide::domain::{CatalogueLimits, CatalogueSeed, CatalogueSeeder};
use city_guide::inbound::http::configure_api;
use city_guide::inbound::http::identity::{AUTH_USER_ID_HEADER, AUTH_USERNAME_HEADER};
use city_guide::inbound::http::state::HttpState;
use city_guide::outbound::memory::InMemoryStore;
use city_guide::server::MemoryRepositories;
use mockable::DefaultClock;
use serde_json::Value;

const BUCHAREST_FIXTURE: &str = include_str!("../../fixtures/bucharest.json");
pub(crate) const SYNC_SECRET: &str = "whsec_journeys";

/// Status and decoded body of one response.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub(crate) status: u16,
    pub(crate) body: Value,
}

pub(crate) struct VisitorWorld {
    runner: SystemRunner,
    store: InMemoryStore,
    state: HttpState,
    signed_in_as: RefCell<Option<String>>,
    event_ids: RefCell<HashMap<String, String>>,
    responses: RefCell<Vec<Recorded>>,
}

impl VisitorWorld {
    pub(crate) fn new() -> Self {
        let store = InMemoryStore::new();
        let ports = MemoryRepositories::in_memory(&store)
            .into_ports(Arc::new(DefaultClock), CatalogueLimits::default());
        Self {
            runner: System::new(),
            store,
            state: HttpState::new(ports).with_identity_sync_secret(Some(SYNC_SECRET.to_owned())),
            signed_in_as: RefCell::new(None),
            event_ids: RefCell::new(HashMap::new()),
            responses: RefCell::new(Vec::new()),
        }
    }

    /// Load the Bucharest fixture and remember each event id by title.
    pub(crate) fn seed_catalogue(&self) {
        let seeder = CatalogueSeeder::new(Arc::new(self.store.clone()), Arc::new(DefaultClock));
        let seed = CatalogueSeed::from_json(BUCHAREST_FIXTURE).expect("fixture parses");
        let report = self
            .runner
            .block_on(seeder.seed(seed, false))
            .expect("fixture seeds");
        assert_eq!(report.events_created, 3);

        let listed = self.send(TestRequest::get().uri("/api/v1/events"));
        assert_eq!(listed.status, 200);
        let mut ids = self.event_ids.borrow_mut();
        for event in listed.body.as_array().expect("event array") {
            let title = event["title"].as_str().expect("title").to_owned();
            let id = event["id"].as_str().expect("id").to_owned();
            ids.insert(title, id);
        }
    }

    pub(crate) fn sign_in(&self, external_id: &str) {
        self.signed_in_as.replace(Some(external_id.to_owned()));
    }

    pub(crate) fn event_id(&self, title: &str) -> String {
        self.event_ids
            .borrow()
            .get(title)
            .cloned()
            .unwrap_or_else(|| panic!("no seeded event titled {title}"))
    }

    /// Send `request` as the current visitor and record the response.
    pub(crate) fn perform(&self, request: TestRequest) {
        let request = match self.signed_in_as.borrow().as_deref() {
            Some(external_id) => request
                .insert_header((AUTH_USER_ID_HEADER, external_id))
                .insert_header((AUTH_USERNAME_HEADER, external_id)),
            None => request,
        };
        self.perform_anonymously(request);
    }

    /// Send `request` without identity headers and record the response.
    pub(crate) fn perform_anonymously(&self, request: TestRequest) {
        let recorded = self.send(request);
        self.responses.borrow_mut().push(recorded);
    }

    pub(crate) fn last(&self) -> Recorded {
        self.responses
            .borrow()
            .last()
            .cloned()
            .expect("a request was performed")
    }

    pub(crate) fn last_two(&self) -> (Recorded, Recorded) {
        let responses = self.responses.borrow();
        let [.., first, second] = responses.as_slice() else {
            panic!("expected at least two responses");
        };
        (first.clone(), second.clone())
    }

    fn send(&self, request: TestRequest) -> Recorded {
        let state = self.state.clone();
        self.runner.block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .wrap(Trace)
                    .service(web::scope("/api/v1").configure(configure_api)),
            )
            .await;
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let bytes = actix_test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON body")
            };
            Recorded { status, body }
        })
    }
}
