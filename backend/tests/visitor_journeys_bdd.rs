//! Behavioural tests for the visitor-facing REST journeys.
#[path = "support/visitor_world.rs"]
mod visitor_world;

use actix_web::test::TestRequest;
use city_guide::inbound::http::identity_sync::IDENTITY_SYNC_SECRET_HEADER;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use visitor_world::{SYNC_SECRET, VisitorWorld};

#[fixture]
fn world() -> VisitorWorld {
    VisitorWorld::new()
}

fn array(body: &Value) -> &Vec<Value> {
    body.as_array().expect("array body")
}

fn titles(items: &[Value], field: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get(field).and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("a catalogue seeded with Bucharest venues")]
fn a_catalogue_seeded_with_bucharest_venues(world: &VisitorWorld) {
    world.seed_catalogue();
}

#[given("the visitor is signed in as {external_id}")]
fn the_visitor_is_signed_in_as(world: &VisitorWorld, external_id: String) {
    world.sign_in(&external_id);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the visitor rates event {target_id} with {rating} and comments {comment}")]
fn the_visitor_rates_event(world: &VisitorWorld, target_id: String, rating: i64, comment: String) {
    world.perform(TestRequest::post().uri("/api/v1/reviews").set_json(json!({
        "targetType": "event",
        "targetId": target_id,
        "rating": rating,
        "comment": comment,
    })));
}

#[when("the reviews for event {target_id} are listed")]
fn the_reviews_for_event_are_listed(world: &VisitorWorld, target_id: String) {
    world.perform(
        TestRequest::get().uri(&format!("/api/v1/reviews?targetType=event&targetId={target_id}")),
    );
}

#[when("the visitor saves {title} to the wishlist")]
fn the_visitor_saves_to_the_wishlist(world: &VisitorWorld, title: String) {
    let event_id = world.event_id(&title);
    world.perform(TestRequest::post().uri("/api/v1/wishlist").set_json(json!({
        "targetType": "event",
        "targetId": event_id,
    })));
}

#[when("the visitor searches the {category} category")]
fn the_visitor_searches_the_category(world: &VisitorWorld, category: String) {
    let encoded = category.replace('&', "%26");
    world.perform(TestRequest::get().uri(&format!("/api/v1/search?category={encoded}")));
}

#[when("the visitor reserves {quantity} tickets for {title}")]
fn the_visitor_reserves_tickets(world: &VisitorWorld, quantity: i64, title: String) {
    let event_id = world.event_id(&title);
    world.perform(TestRequest::post().uri("/api/v1/tickets").set_json(json!({
        "eventId": event_id,
        "quantity": quantity,
    })));
}

#[when("the identity provider reports that {external_id} was deleted")]
fn the_identity_provider_reports_a_deletion(world: &VisitorWorld, external_id: String) {
    world.perform_anonymously(
        TestRequest::post()
            .uri("/api/v1/identity/events")
            .insert_header((IDENTITY_SYNC_SECRET_HEADER, SYNC_SECRET))
            .set_json(json!({"type": "user.deleted", "data": {"id": external_id}})),
    );
}

#[when("the visitor lists their tickets")]
fn the_visitor_lists_their_tickets(world: &VisitorWorld) {
    world.perform(TestRequest::get().uri("/api/v1/tickets"));
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the response status is {status}")]
fn the_response_status_is(world: &VisitorWorld, status: u16) {
    let last = world.last();
    assert_eq!(last.status, status, "body: {}", last.body);
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &VisitorWorld, code: String) {
    let last = world.last();
    assert_eq!(last.body["code"].as_str(), Some(code.as_str()));
    assert!(
        last.body.get("traceId").and_then(Value::as_str).is_some(),
        "errors carry a trace id"
    );
}

#[then("{count} review is listed with rating {rating}")]
fn reviews_are_listed_with_rating(world: &VisitorWorld, count: usize, rating: u64) {
    let last = world.last();
    let reviews = array(&last.body);
    assert_eq!(reviews.len(), count);
    assert!(
        reviews
            .iter()
            .all(|review| review["rating"].as_u64() == Some(rating))
    );
}

#[then("both saves return the same entry")]
fn both_saves_return_the_same_entry(world: &VisitorWorld) {
    let (first, second) = world.last_two();
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 200);
    assert_eq!(first.body["id"], second.body["id"]);
}

#[then("the webhook acknowledges receipt")]
fn the_webhook_acknowledges_receipt(world: &VisitorWorld) {
    let last = world.last();
    assert_eq!(last.status, 200);
    assert_eq!(last.body, json!({"received": true}));
}

#[then("the wishlist holds {count} entry")]
fn the_wishlist_holds(world: &VisitorWorld, count: usize) {
    world.perform(TestRequest::get().uri("/api/v1/wishlist"));
    let last = world.last();
    assert_eq!(last.status, 200);
    assert_eq!(array(&last.body).len(), count);
}

#[then("the search lists location {name}")]
fn the_search_lists_location(world: &VisitorWorld, name: String) {
    let last = world.last();
    let locations = titles(array(&last.body["locations"]), "name");
    assert!(locations.contains(&name), "locations: {locations:?}");
}

#[then("the search lists event {title}")]
fn the_search_lists_event(world: &VisitorWorld, title: String) {
    let last = world.last();
    let events = titles(array(&last.body["events"]), "title");
    assert!(events.contains(&title), "events: {events:?}");
}

#[then("no nightlife venue is listed")]
fn no_nightlife_venue_is_listed(world: &VisitorWorld) {
    let last = world.last();
    let locations = titles(array(&last.body["locations"]), "name");
    assert!(!locations.iter().any(|name| name == "Control Club"));
}

#[then("{count} reservation is listed for {title}")]
fn reservations_are_listed_for(world: &VisitorWorld, count: usize, title: String) {
    let last = world.last();
    assert_eq!(last.status, 200);
    let reservations = array(&last.body);
    assert_eq!(reservations.len(), count);
    for entry in reservations {
        assert_eq!(entry["event"]["title"].as_str(), Some(title.as_str()));
        assert_eq!(entry["reservation"]["quantity"].as_u64(), Some(2));
    }
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "A review is listed under its target"
)]
fn a_review_is_listed_under_its_target(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Saving an event twice keeps a single wishlist entry"
)]
fn saving_an_event_twice_keeps_a_single_wishlist_entry(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Food and drink search lists matching places and events"
)]
fn food_and_drink_search_lists_matching_places_and_events(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Reserving zero tickets is rejected"
)]
fn reserving_zero_tickets_is_rejected(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Anonymous visitors cannot reserve tickets"
)]
fn anonymous_visitors_cannot_reserve_tickets(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Reservations are listed with their events"
)]
fn reservations_are_listed_with_their_events(world: VisitorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/visitor_journeys.feature",
    name = "Deleted accounts lose their wishlist"
)]
fn deleted_accounts_lose_their_wishlist(world: VisitorWorld) {
    let _ = world;
}
