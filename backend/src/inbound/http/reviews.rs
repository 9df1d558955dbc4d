//! Review endpoints.
//!
//! ```text
//! POST /api/v1/reviews
//! GET  /api/v1/reviews?targetId=&targetType=
//! ```
//!
//! Reviews are append-only and readable without signing in. Target ids are
//! opaque: a review may name an id the catalogue does not hold.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::SubmitReviewRequest;
use crate::domain::{Rating, Review, TargetType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, out_of_range_error, parse_target, parse_target_id,
    parse_target_type, require,
};

const RATING: FieldName = FieldName::new("rating");
const TARGET_ID: FieldName = FieldName::new("targetId");
const TARGET_TYPE: FieldName = FieldName::new("targetType");

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewBody {
    #[schema(example = "event")]
    pub target_type: Option<String>,
    #[schema(example = "event-123")]
    pub target_id: Option<String>,
    #[schema(value_type = Option<i64>, example = 5)]
    pub rating: Option<Value>,
    #[schema(example = "Great!")]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub target_type: String,
    pub target_id: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            target_type: value.target.target_type.as_str().to_owned(),
            target_id: value.target.target_id.to_string(),
            rating: value.rating.value(),
            comment: value.comment,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReviewListParams {
    /// Reviewed event or location id. Required.
    pub target_id: Option<String>,
    /// `event` or `location`; omitted means either.
    pub target_type: Option<String>,
}

fn parse_rating(raw: &Value) -> ApiResult<Rating> {
    let whole = raw
        .as_i64()
        .ok_or_else(|| invalid_value_error(RATING, raw.to_string(), "rating must be an integer"))?;
    Rating::new(whole).map_err(|err| out_of_range_error(RATING, err.0, err.to_string()))
}

/// Record a review by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = SubmitReviewBody,
    responses(
        (status = 201, description = "Review stored", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "submitReview"
)]
#[post("/reviews")]
pub async fn submit_review(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<SubmitReviewBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let target = parse_target(body.target_type.as_deref(), body.target_id.as_deref())?;
    let rating = parse_rating(&require(body.rating, RATING)?)?;
    let review = state
        .reviews
        .submit(SubmitReviewRequest {
            identity: identity.into_inner(),
            target,
            rating,
            comment: body.comment,
        })
        .await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// Reviews of one target, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    params(ReviewListParams),
    responses(
        (status = 200, description = "Reviews", body = [ReviewResponse]),
        (status = 400, description = "Missing or invalid target", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    params: web::Query<ReviewListParams>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let params = params.into_inner();
    let target_id = parse_target_id(&require(params.target_id, TARGET_ID)?, TARGET_ID)?;
    let target_type: Option<TargetType> = params
        .target_type
        .as_deref()
        .map(|raw| parse_target_type(raw, TARGET_TYPE))
        .transpose()?;
    let reviews = state.reviews_query.list_reviews(target_id, target_type).await?;
    Ok(web::Json(reviews.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestApp, signed_in};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[actix_web::test]
    async fn submitted_reviews_are_listed_for_their_target() {
        let app = TestApp::seeded().await;
        let service = actix_test::init_service(app.app()).await;
        let req = signed_in(actix_test::TestRequest::post().uri("/api/v1/reviews"), "user_ana")
            .set_json(json!({
                "targetType": "event",
                "targetId": "event-123",
                "rating": 5,
                "comment": "Great!"
            }))
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: ReviewResponse = actix_test::read_body_json(res).await;
        assert_eq!(created.rating, 5);
        assert_eq!(created.comment.as_deref(), Some("Great!"));

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/reviews?targetId=event-123&targetType=event")
            .to_request();
        let listed: Vec<ReviewResponse> = actix_test::call_and_read_body_json(&service, req).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].user_id, created.user_id);

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/reviews?targetId=event-123&targetType=location")
            .to_request();
        let other: Vec<ReviewResponse> = actix_test::call_and_read_body_json(&service, req).await;
        assert!(other.is_empty());
    }

    #[rstest]
    #[case(json!({"targetType": "event", "targetId": "e1", "rating": 0}), "rating")]
    #[case(json!({"targetType": "event", "targetId": "e1", "rating": 6}), "rating")]
    #[case(json!({"targetType": "event", "targetId": "e1"}), "rating")]
    #[case(json!({"targetType": "venue", "targetId": "e1", "rating": 3}), "targetType")]
    #[case(json!({"targetType": "event", "targetId": "  ", "rating": 3}), "targetId")]
    #[case(json!({"targetId": "e1", "rating": 3}), "targetType")]
    #[actix_web::test]
    async fn invalid_submissions_name_the_field(#[case] body: Value, #[case] field: &str) {
        let app = TestApp::empty();
        let service = actix_test::init_service(app.app()).await;
        let req = signed_in(actix_test::TestRequest::post().uri("/api/v1/reviews"), "user_ana")
            .set_json(body)
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Value = actix_test::read_body_json(res).await;
        assert_eq!(error["details"]["field"], field);
    }

    #[actix_web::test]
    async fn listing_requires_a_target_id() {
        let app = TestApp::empty();
        let service = actix_test::init_service(app.app()).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/reviews?targetType=event")
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Value = actix_test::read_body_json(res).await;
        assert_eq!(error["details"]["code"], "missing_field");
    }

    #[actix_web::test]
    async fn submitting_requires_sign_in() {
        let app = TestApp::empty();
        let service = actix_test::init_service(app.app()).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/reviews")
            .set_json(json!({"targetType": "event", "targetId": "e1", "rating": 4}))
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
