//! Identity provider webhook.
//!
//! ```text
//! POST /api/v1/identity/events
//! ```
//!
//! The provider posts user lifecycle notifications shaped as
//! `{ "type": "user.created", "data": { "id": "...", ... } }`. Calls must
//! carry the configured shared secret in `x-identity-sync-secret`; with no
//! secret configured every call is rejected.

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::{IdentitySyncEvent, IdentitySyncOutcome};
use crate::domain::{Error, ExternalIdentity, ExternalUserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require};

/// Header carrying the shared webhook secret.
pub const IDENTITY_SYNC_SECRET_HEADER: &str = "x-identity-sync-secret";

const DATA_ID: FieldName = FieldName::new("data.id");

/// One entry of the provider's email address list.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EmailAddressBody {
    /// Address text; the first non-blank entry becomes the contact email.
    pub email_address: Option<String>,
}

/// Account fields carried by a notification.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct IdentityEventData {
    /// Provider account id; required for lifecycle events.
    #[schema(example = "user_2abcXYZ")]
    pub id: Option<String>,
    /// Display handle, if the account has one.
    pub username: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Addresses in provider order.
    #[serde(default)]
    pub email_addresses: Vec<EmailAddressBody>,
}

/// Notification envelope posted by the provider.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IdentityEventBody {
    /// Event name such as `user.created`; unknown names are acknowledged.
    #[serde(rename = "type")]
    #[schema(example = "user.created")]
    pub event_type: String,
    /// Account payload; absent for events that carry none.
    #[serde(default)]
    pub data: IdentityEventData,
}

/// Acknowledgement returned for every authorised notification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceivedResponse {
    /// Always `true` once the event has been handled or ignored.
    pub received: bool,
}

fn authorise(req: &HttpRequest, state: &HttpState) -> ApiResult<()> {
    let Some(expected) = state.identity_sync_secret() else {
        warn!("identity sync called without a configured secret");
        return Err(Error::unauthorized("identity sync is not configured"));
    };
    let presented = req
        .headers()
        .get(IDENTITY_SYNC_SECRET_HEADER)
        .map(|value| value.as_bytes());
    if presented.is_some_and(|presented| secret_matches(presented, expected)) {
        Ok(())
    } else {
        Err(Error::unauthorized("invalid identity sync secret"))
    }
}

/// Compare in time independent of where the inputs first differ.
fn secret_matches(presented: &[u8], expected: &str) -> bool {
    constant_time_eq::constant_time_eq(presented, expected.as_bytes())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn identity_from(data: IdentityEventData) -> ApiResult<ExternalIdentity> {
    let IdentityEventData {
        id,
        username,
        first_name,
        last_name,
        email_addresses,
    } = data;
    let id = require(non_blank(id), DATA_ID)?;
    let identity = ExternalIdentity::new(&id)
        .map_err(|err| invalid_value_error(DATA_ID, id.as_str(), err.to_string()))?;
    let email = email_addresses
        .into_iter()
        .find_map(|entry| non_blank(entry.email_address));
    Ok(identity
        .with_username(non_blank(username))
        .with_names(non_blank(first_name), non_blank(last_name))
        .with_email(email))
}

/// Translate the provider payload into a domain notification.
pub(crate) fn sync_event(body: IdentityEventBody) -> ApiResult<IdentitySyncEvent> {
    match body.event_type.as_str() {
        "user.created" => identity_from(body.data).map(IdentitySyncEvent::Created),
        "user.updated" => identity_from(body.data).map(IdentitySyncEvent::Updated),
        "user.deleted" => {
            let id = require(non_blank(body.data.id), DATA_ID)?;
            ExternalUserId::new(&id)
                .map(IdentitySyncEvent::Deleted)
                .map_err(|err| invalid_value_error(DATA_ID, id.as_str(), err.to_string()))
        }
        _ => Ok(IdentitySyncEvent::Ignored {
            event_type: body.event_type,
        }),
    }
}

/// Apply one user lifecycle notification.
#[utoipa::path(
    post,
    path = "/api/v1/identity/events",
    request_body = IdentityEventBody,
    params(("x-identity-sync-secret" = String, Header, description = "Shared webhook secret")),
    responses(
        (status = 200, description = "Notification processed", body = ReceivedResponse),
        (status = 400, description = "Malformed notification", body = ErrorSchema),
        (status = 401, description = "Missing or wrong secret", body = ErrorSchema),
        (status = 409, description = "Profile collides with another user", body = ErrorSchema)
    ),
    tags = ["identity"],
    operation_id = "applyIdentityEvent"
)]
#[post("/identity/events")]
pub async fn identity_events(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<IdentityEventBody>,
) -> ApiResult<web::Json<ReceivedResponse>> {
    authorise(&req, &state)?;
    let event = sync_event(payload.into_inner())?;
    let outcome = state.identity_sync.apply(event).await?;
    if let IdentitySyncOutcome::Deleted { removed: false } = outcome {
        info!("deletion notification for an unknown account");
    }
    Ok(web::Json(ReceivedResponse { received: true }))
}

#[cfg(test)]
#[path = "identity_sync_tests.rs"]
mod tests;
