//! PostgreSQL-backed `ReviewRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{Rating, Review, ReviewId, Target, TargetId, TargetType, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ReviewRow;
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    map_basic_diesel_error(
        error,
        ReviewRepositoryError::query,
        ReviewRepositoryError::connection,
    )
}

/// Rebuild a stored target; shared with the wishlist adapter.
pub(super) fn stored_target(kind: &str, id: &str) -> Result<Target, String> {
    let target_type: TargetType = kind.parse().map_err(|err| format!("{err}"))?;
    let target_id = TargetId::new(id).map_err(|err| format!("stored target id: {err}"))?;
    Ok(Target::new(target_type, target_id))
}

fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    let target =
        stored_target(&row.target_type, &row.target_id).map_err(ReviewRepositoryError::query)?;
    let rating = Rating::new(i64::from(row.rating))
        .map_err(|err| ReviewRepositoryError::query(format!("stored review {}: {err}", row.id)))?;
    Ok(Review {
        id: ReviewId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        target,
        rating,
        comment: row.comment,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let row = ReviewRow {
            id: *review.id.as_uuid(),
            user_id: *review.user_id.as_uuid(),
            target_type: review.target.target_type.as_str().to_owned(),
            target_id: review.target.target_id.as_str().to_owned(),
            rating: i16::from(review.rating.value()),
            comment: review.comment.clone(),
            created_at: review.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_target(
        &self,
        target_id: &TargetId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = reviews::table
            .filter(reviews::target_id.eq(target_id.as_str().to_owned()))
            .select(ReviewRow::as_select())
            .order_by(reviews::created_at.desc())
            .into_boxed();
        if let Some(kind) = target_type {
            query = query.filter(reviews::target_type.eq(kind.as_str()));
        }
        query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_review)
            .collect()
    }
}
