//! HTTP inbound adapter exposing REST endpoints.

pub mod catalogue;
pub mod error;
pub mod health;
pub mod identity;
pub mod identity_sync;
pub mod questions;
pub mod reviews;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tickets;
pub mod validation;
pub mod wishlist;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// `/events/upcoming` is registered before `/events/{id}` so the literal
/// segment wins.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogue::list_events)
        .service(catalogue::upcoming_events)
        .service(catalogue::get_event)
        .service(catalogue::list_locations)
        .service(catalogue::get_location)
        .service(catalogue::search)
        .service(catalogue::suggestions)
        .service(tickets::reserve_tickets)
        .service(tickets::list_tickets)
        .service(reviews::submit_review)
        .service(reviews::list_reviews)
        .service(wishlist::add_to_wishlist)
        .service(wishlist::remove_from_wishlist)
        .service(wishlist::list_wishlist)
        .service(questions::submit_question)
        .service(questions::list_questions)
        .service(identity_sync::identity_events);
}
