//! PostgreSQL-backed `WishlistRepository` implementation.
//!
//! `wishlist_user_target_key` keeps one row per `(user, target)`; its
//! violation is reported as [`WishlistRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{WishlistRepository, WishlistRepositoryError};
use crate::domain::{Target, TargetType, UserId, WishlistEntry, WishlistEntryId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_review_repository::stored_target;
use super::models::WishlistRow;
use super::pool::{DbPool, PoolError};
use super::schema::wishlist;

/// Diesel-backed implementation of the `WishlistRepository` port.
#[derive(Clone)]
pub struct DieselWishlistRepository {
    pool: DbPool,
}

impl DieselWishlistRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WishlistRepositoryError {
    map_basic_pool_error(error, WishlistRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> WishlistRepositoryError {
    if let Some(ConstraintViolation::Unique(_)) = constraint_violation(&error) {
        return WishlistRepositoryError::duplicate();
    }
    map_basic_diesel_error(
        error,
        WishlistRepositoryError::query,
        WishlistRepositoryError::connection,
    )
}

fn row_to_entry(row: WishlistRow) -> Result<WishlistEntry, WishlistRepositoryError> {
    let target =
        stored_target(&row.target_type, &row.target_id).map_err(WishlistRepositoryError::query)?;
    Ok(WishlistEntry {
        id: WishlistEntryId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        target,
        created_at: row.created_at,
    })
}

#[async_trait]
impl WishlistRepository for DieselWishlistRepository {
    async fn find(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<Option<WishlistEntry>, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        wishlist::table
            .filter(wishlist::user_id.eq(user_id.as_uuid()))
            .filter(wishlist::target_type.eq(target.target_type.as_str()))
            .filter(wishlist::target_id.eq(target.target_id.as_str()))
            .select(WishlistRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_entry)
            .transpose()
    }

    async fn insert(&self, entry: &WishlistEntry) -> Result<(), WishlistRepositoryError> {
        let row = WishlistRow {
            id: *entry.id.as_uuid(),
            user_id: *entry.user_id.as_uuid(),
            target_type: entry.target.target_type.as_str().to_owned(),
            target_id: entry.target.target_id.as_str().to_owned(),
            created_at: entry.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(wishlist::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<usize, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(wishlist::table)
            .filter(wishlist::user_id.eq(user_id.as_uuid()))
            .filter(wishlist::target_type.eq(target.target_type.as_str()))
            .filter(wishlist::target_id.eq(target.target_id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = wishlist::table
            .filter(wishlist::user_id.eq(*user_id.as_uuid()))
            .select(WishlistRow::as_select())
            .order_by(wishlist::created_at.desc())
            .into_boxed();
        if let Some(kind) = target_type {
            query = query.filter(wishlist::target_type.eq(kind.as_str()));
        }
        query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_entry)
            .collect()
    }
}
