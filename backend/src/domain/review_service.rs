//! Reviews of events and locations.
//!
//! Reviews are keyed by `(target type, target id)` and the target is not
//! required to exist in the catalogue, so clients may review entities that
//! are managed elsewhere.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityBinding, ReviewCommand, ReviewQuery, ReviewRepository, ReviewRepositoryError,
    SubmitReviewRequest,
};
use crate::domain::review::COMMENT_MAX;
use crate::domain::{Error, Review, ReviewId, TargetId, TargetType};

fn map_review_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => Error::service_unavailable(message),
        ReviewRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Repository-backed review command and query.
#[derive(Clone)]
pub struct ReviewService<R> {
    binder: Arc<dyn IdentityBinding>,
    reviews: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReviewService<R> {
    /// Create the service.
    pub fn new(binder: Arc<dyn IdentityBinding>, reviews: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            binder,
            reviews,
            clock,
        }
    }
}

#[async_trait]
impl<R> ReviewCommand for ReviewService<R>
where
    R: ReviewRepository,
{
    async fn submit(&self, request: SubmitReviewRequest) -> Result<Review, Error> {
        let comment = request
            .comment
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        if comment
            .as_ref()
            .is_some_and(|text| text.chars().count() > COMMENT_MAX)
        {
            return Err(Error::invalid_request(format!(
                "comment must be at most {COMMENT_MAX} characters"
            )));
        }

        let user = self.binder.bind(&request.identity).await?;
        let review = Review {
            id: ReviewId::random(),
            user_id: user.id(),
            target: request.target,
            rating: request.rating,
            comment,
            created_at: self.clock.utc(),
        };
        self.reviews
            .insert(&review)
            .await
            .map_err(map_review_error)?;
        info!(
            user_id = %user.id(),
            target_type = %review.target.target_type,
            target_id = %review.target.target_id,
            rating = review.rating.value(),
            "stored review"
        );
        Ok(review)
    }
}

#[async_trait]
impl<R> ReviewQuery for ReviewService<R>
where
    R: ReviewRepository,
{
    async fn list_reviews(
        &self,
        target_id: TargetId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_for_target(&target_id, target_type)
            .await
            .map_err(map_review_error)
    }
}
