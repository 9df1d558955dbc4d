//! Catalogue read endpoints: events, locations, and search.
//!
//! ```text
//! GET /api/v1/events?category=&q=&subCategory=
//! GET /api/v1/events/upcoming
//! GET /api/v1/events/{id}
//! GET /api/v1/locations?category=&q=
//! GET /api/v1/locations/{id}
//! GET /api/v1/search?category=&q=
//! GET /api/v1/search/suggestions?category=&q=
//! ```
//!
//! Decimal values are rendered as strings so clients never see a rounded
//! coordinate or price.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Event, EventDetails, EventFilter, EventId, Location, LocationId, SearchQuery, SearchResults,
    Suggestion,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_category, parse_sub_category, parse_uuid,
};

/// Location as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Romanian Athenaeum")]
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    #[schema(example = "44.4413")]
    pub latitude: String,
    #[schema(example = "26.0973")]
    pub longitude: String,
    pub image_url: Option<String>,
    #[schema(example = "cultural")]
    pub category: String,
}

impl From<Location> for LocationResponse {
    fn from(value: Location) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            address: value.address,
            latitude: value.latitude.to_string(),
            longitude: value.longitude.to_string(),
            image_url: value.image_url,
            category: value.category.as_str().to_owned(),
        }
    }
}

/// Event as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    #[schema(example = "Jazz in the Park")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "2026-06-12T18:00:00Z")]
    pub starts_at: String,
    pub ends_at: String,
    pub location_id: String,
    #[schema(example = "events")]
    pub main_category: String,
    #[schema(example = "concert")]
    pub sub_category: String,
    pub image_url: Option<String>,
    #[schema(example = "0")]
    pub price: String,
    pub is_free: bool,
    pub capacity: Option<u32>,
    pub created_at: String,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let is_free = value.is_free();
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            starts_at: value.starts_at.to_rfc3339(),
            ends_at: value.ends_at.to_rfc3339(),
            location_id: value.location_id.to_string(),
            main_category: value.main_category.as_str().to_owned(),
            sub_category: value.sub_category.as_str().to_owned(),
            image_url: value.image_url,
            price: value.price.to_string(),
            is_free,
            capacity: value.capacity,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Event enriched with its host location's name and coordinates.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
}

impl From<EventDetails> for EventDetailsResponse {
    fn from(value: EventDetails) -> Self {
        Self {
            event: value.event.into(),
            location_name: value.location_name,
            latitude: value.latitude.to_string(),
            longitude: value.longitude.to_string(),
        }
    }
}

/// Full search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub locations: Vec<LocationResponse>,
    pub events: Vec<EventResponse>,
}

impl From<SearchResults> for SearchResponse {
    fn from(value: SearchResults) -> Self {
        Self {
            locations: value.locations.into_iter().map(Into::into).collect(),
            events: value.events.into_iter().map(Into::into).collect(),
        }
    }
}

/// One quick-search suggestion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    #[schema(example = "location")]
    pub kind: String,
    pub id: String,
    #[schema(example = "Herastrau Park")]
    pub label: String,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(value: Suggestion) -> Self {
        let kind = match value.kind() {
            crate::domain::EntityKind::Event => "event",
            crate::domain::EntityKind::Location => "location",
        };
        let label = value.label().to_owned();
        let id = match value {
            Suggestion::Location { id, .. } => id.to_string(),
            Suggestion::Event { id, .. } => id.to_string(),
        };
        Self {
            kind: kind.to_owned(),
            id,
            label,
        }
    }
}

/// Category and free-text filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// One of `all`, `events`, `activities`, `food&drink`, `nightlife`, `culture`.
    pub category: Option<String>,
    /// Case-insensitive substring of the name or title.
    pub q: Option<String>,
}

/// Event listing filter: category, title text, and sub-category.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventListParams {
    /// One of `all`, `events`, `activities`, `food&drink`, `nightlife`, `culture`.
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub q: Option<String>,
    /// Exact sub-category such as `concert` or `meetup`.
    pub sub_category: Option<String>,
}

fn search_query(params: SearchParams) -> ApiResult<SearchQuery> {
    let category = parse_category(params.category.as_deref())?;
    Ok(SearchQuery::new(category, params.q.unwrap_or_default()))
}

fn event_filter(params: EventListParams) -> ApiResult<EventFilter> {
    let sub_category = parse_sub_category(params.sub_category.as_deref())?;
    let query = search_query(SearchParams {
        category: params.category,
        q: params.q,
    })?;
    Ok(EventFilter::from(query).with_sub_category(sub_category))
}

fn event_id(raw: &str) -> ApiResult<EventId> {
    parse_uuid(raw, FieldName::new("id")).map(EventId::from_uuid)
}

fn location_id(raw: &str) -> ApiResult<LocationId> {
    parse_uuid(raw, FieldName::new("id")).map(LocationId::from_uuid)
}

/// Newest events first, optionally narrowed.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(EventListParams),
    responses(
        (status = 200, description = "Events, newest start first", body = [EventResponse]),
        (status = 400, description = "Unknown category or sub-category", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    params: web::Query<EventListParams>,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let filter = event_filter(params.into_inner())?;
    let events = state.catalogue.list_events(filter).await?;
    Ok(web::Json(events.into_iter().map(Into::into).collect()))
}

/// Events that have not started yet, soonest first.
#[utoipa::path(
    get,
    path = "/api/v1/events/upcoming",
    responses(
        (status = 200, description = "Upcoming events", body = [EventResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listUpcomingEvents"
)]
#[get("/events/upcoming")]
pub async fn upcoming_events(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let events = state.catalogue.upcoming_events().await?;
    Ok(web::Json(events.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event UUID")),
    responses(
        (status = 200, description = "Event with its location", body = EventDetailsResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Event not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getEvent"
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventDetailsResponse>> {
    let id = event_id(&path.into_inner())?;
    let details = state.catalogue.event_details(id).await?;
    Ok(web::Json(details.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations",
    params(SearchParams),
    responses(
        (status = 200, description = "Locations ordered by name", body = [LocationResponse]),
        (status = 400, description = "Unknown category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<LocationResponse>>> {
    let query = search_query(params.into_inner())?;
    let locations = state.catalogue.list_locations(query).await?;
    Ok(web::Json(locations.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    params(("id" = String, Path, description = "Location UUID")),
    responses(
        (status = 200, description = "Location", body = LocationResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Location not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getLocation"
)]
#[get("/locations/{id}")]
pub async fn get_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LocationResponse>> {
    let id = location_id(&path.into_inner())?;
    let location = state.catalogue.location(id).await?;
    Ok(web::Json(location.into()))
}

/// Full search over the whole catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching locations and events", body = SearchResponse),
        (status = 400, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "search"
)]
#[get("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchResponse>> {
    let query = search_query(params.into_inner())?;
    let results = state.catalogue.search(query).await?;
    Ok(web::Json(results.into()))
}

/// At most three live-typing suggestions, locations first.
#[utoipa::path(
    get,
    path = "/api/v1/search/suggestions",
    params(SearchParams),
    responses(
        (status = 200, description = "Suggestions", body = [SuggestionResponse]),
        (status = 400, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "searchSuggestions"
)]
#[get("/search/suggestions")]
pub async fn suggestions(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<SuggestionResponse>>> {
    let query = search_query(params.into_inner())?;
    let suggestions = state.catalogue.suggestions(query).await?;
    Ok(web::Json(suggestions.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
