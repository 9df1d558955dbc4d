//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request and response schemas. The document backs Swagger UI in
//! debug builds and is printed by the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::catalogue::{
    EventDetailsResponse, EventResponse, LocationResponse, SearchResponse, SuggestionResponse,
};
use crate::inbound::http::health::{ReadyResponse, StoreKind};
use crate::inbound::http::identity::AUTH_USER_ID_HEADER;
use crate::inbound::http::identity_sync::{
    EmailAddressBody, IdentityEventBody, IdentityEventData, ReceivedResponse,
};
use crate::inbound::http::questions::{QuestionBody, QuestionResponse};
use crate::inbound::http::reviews::{ReviewResponse, SubmitReviewBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tickets::{
    ReservationResponse, ReservationWithEventResponse, ReserveTicketBody,
};
use crate::inbound::http::wishlist::{RemovedResponse, WishlistBody, WishlistEntryResponse};

/// Registers the gateway identity header as the security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GatewayIdentity",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTH_USER_ID_HEADER,
                "Account id forwarded by the authentication gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "City guide API",
        description = "Events, places, tickets, reviews, and wishlists for the city guide.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::list_events,
        crate::inbound::http::catalogue::upcoming_events,
        crate::inbound::http::catalogue::get_event,
        crate::inbound::http::catalogue::list_locations,
        crate::inbound::http::catalogue::get_location,
        crate::inbound::http::catalogue::search,
        crate::inbound::http::catalogue::suggestions,
        crate::inbound::http::tickets::reserve_tickets,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::reviews::submit_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::wishlist::add_to_wishlist,
        crate::inbound::http::wishlist::remove_from_wishlist,
        crate::inbound::http::wishlist::list_wishlist,
        crate::inbound::http::questions::submit_question,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::identity_sync::identity_events,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LocationResponse,
        EventResponse,
        EventDetailsResponse,
        SearchResponse,
        SuggestionResponse,
        ReserveTicketBody,
        ReservationResponse,
        ReservationWithEventResponse,
        SubmitReviewBody,
        ReviewResponse,
        WishlistBody,
        WishlistEntryResponse,
        RemovedResponse,
        QuestionBody,
        QuestionResponse,
        IdentityEventBody,
        IdentityEventData,
        EmailAddressBody,
        ReceivedResponse,
        ReadyResponse,
        StoreKind,
    )),
    tags(
        (name = "catalogue", description = "Events, locations, and search"),
        (name = "tickets", description = "Ticket reservations"),
        (name = "reviews", description = "Ratings and comments"),
        (name = "wishlist", description = "Saved events and locations"),
        (name = "questions", description = "FAQ submissions"),
        (name = "identity", description = "Identity provider webhook"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
