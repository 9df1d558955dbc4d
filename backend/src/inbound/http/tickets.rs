//! Ticket reservation endpoints.
//!
//! ```text
//! POST /api/v1/tickets
//! GET  /api/v1/tickets
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::ReserveTicketRequest;
use crate::domain::{EventId, Quantity, ReservationWithEvent};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue::EventResponse;
use crate::inbound::http::identity::AuthenticatedIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, out_of_range_error, parse_uuid, require,
};

const EVENT_ID: FieldName = FieldName::new("eventId");
const QUANTITY: FieldName = FieldName::new("quantity");

/// Reservation request payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTicketBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub event_id: Option<String>,
    #[schema(value_type = Option<i64>, example = 2)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub quantity: u32,
    pub created_at: String,
}

/// A reservation joined with the event it is for.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationWithEventResponse {
    pub reservation: ReservationResponse,
    pub event: EventResponse,
}

impl From<ReservationWithEvent> for ReservationWithEventResponse {
    fn from(value: ReservationWithEvent) -> Self {
        let reservation = value.reservation;
        Self {
            reservation: ReservationResponse {
                id: reservation.id.to_string(),
                user_id: reservation.user_id.to_string(),
                event_id: reservation.event_id.to_string(),
                quantity: reservation.quantity.get(),
                created_at: reservation.created_at.to_rfc3339(),
            },
            event: value.event.into(),
        }
    }
}

fn parse_quantity(raw: &Value) -> ApiResult<Quantity> {
    let whole = raw
        .as_i64()
        .ok_or_else(|| invalid_value_error(QUANTITY, raw.to_string(), "quantity must be an integer"))?;
    Quantity::new(whole).map_err(|err| out_of_range_error(QUANTITY, err.0, err.to_string()))
}

fn parse_body(body: ReserveTicketBody) -> ApiResult<(EventId, Quantity)> {
    let event_id = require(body.event_id, EVENT_ID)?;
    let quantity = require(body.quantity, QUANTITY)?;
    let event_id = EventId::from_uuid(parse_uuid(&event_id, EVENT_ID)?);
    Ok((event_id, parse_quantity(&quantity)?))
}

/// Reserve tickets for an event on behalf of the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = ReserveTicketBody,
    responses(
        (status = 201, description = "Reservation recorded", body = ReservationWithEventResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 404, description = "Event not found", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "reserveTickets"
)]
#[post("/tickets")]
pub async fn reserve_tickets(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<ReserveTicketBody>,
) -> ApiResult<HttpResponse> {
    let (event_id, quantity) = parse_body(payload.into_inner())?;
    let created = state
        .reservations
        .reserve(ReserveTicketRequest {
            identity: identity.into_inner(),
            event_id,
            quantity,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReservationWithEventResponse::from(created)))
}

/// The caller's reservations, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    responses(
        (status = 200, description = "Reservations", body = [ReservationWithEventResponse]),
        (status = 401, description = "Sign in required", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
) -> ApiResult<web::Json<Vec<ReservationWithEventResponse>>> {
    let reservations = state
        .reservations_query
        .list_reservations(identity.as_ref())
        .await?;
    Ok(web::Json(reservations.into_iter().map(Into::into).collect()))
}
