//! Wishlist endpoints.
//!
//! ```text
//! POST   /api/v1/wishlist
//! DELETE /api/v1/wishlist
//! GET    /api/v1/wishlist?targetType=
//! ```
//!
//! Adding is idempotent: repeating a save answers 200 with the stored entry
//! instead of 201.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::WishlistEntry;
use crate::domain::ports::WishlistRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_target, parse_target_type};

/// Target being saved or removed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBody {
    #[schema(example = "event")]
    pub target_type: Option<String>,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub target_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntryResponse {
    pub id: String,
    pub user_id: String,
    pub target_type: String,
    pub target_id: String,
    pub created_at: String,
}

impl From<&WishlistEntry> for WishlistEntryResponse {
    fn from(value: &WishlistEntry) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            target_type: value.target.target_type.as_str().to_owned(),
            target_id: value.target.target_id.to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Acknowledgement for a removal.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemovedResponse {
    pub success: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WishlistListParams {
    /// Restrict to `event` or `location` entries.
    pub target_type: Option<String>,
}

fn request_for(identity: AuthenticatedIdentity, body: &WishlistBody) -> ApiResult<WishlistRequest> {
    let target = parse_target(body.target_type.as_deref(), body.target_id.as_deref())?;
    Ok(WishlistRequest {
        identity: identity.into_inner(),
        target,
    })
}

/// Save a target for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/wishlist",
    request_body = WishlistBody,
    responses(
        (status = 201, description = "Entry created", body = WishlistEntryResponse),
        (status = 200, description = "Already saved; stored entry returned", body = WishlistEntryResponse),
        (status = 400, description = "Invalid target", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "addToWishlist"
)]
#[post("/wishlist")]
pub async fn add_to_wishlist(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<WishlistBody>,
) -> ApiResult<HttpResponse> {
    let request = request_for(identity, &payload)?;
    let outcome = state.wishlist.add(request).await?;
    let body = WishlistEntryResponse::from(outcome.entry());
    let response = if outcome.is_created() {
        HttpResponse::Created().json(body)
    } else {
        HttpResponse::Ok().json(body)
    };
    Ok(response)
}

/// Unsave a target. Removing something never saved still succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/wishlist",
    request_body = WishlistBody,
    responses(
        (status = 200, description = "Entry removed", body = RemovedResponse),
        (status = 400, description = "Invalid target", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "removeFromWishlist"
)]
#[delete("/wishlist")]
pub async fn remove_from_wishlist(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<WishlistBody>,
) -> ApiResult<web::Json<RemovedResponse>> {
    let request = request_for(identity, &payload)?;
    state.wishlist.remove(request).await?;
    Ok(web::Json(RemovedResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/api/v1/wishlist",
    params(WishlistListParams),
    responses(
        (status = 200, description = "Saved entries, newest first", body = [WishlistEntryResponse]),
        (status = 400, description = "Invalid target type", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema)
    ),
    tags = ["wishlist"],
    operation_id = "listWishlist"
)]
#[get("/wishlist")]
pub async fn list_wishlist(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    params: web::Query<WishlistListParams>,
) -> ApiResult<web::Json<Vec<WishlistEntryResponse>>> {
    let target_type = params
        .target_type
        .as_deref()
        .map(|raw| parse_target_type(raw, FieldName::new("targetType")))
        .transpose()?;
    let entries = state
        .wishlist_query
        .list_wishlist(identity.as_ref(), target_type)
        .await?;
    Ok(web::Json(entries.iter().map(Into::into).collect()))
}
