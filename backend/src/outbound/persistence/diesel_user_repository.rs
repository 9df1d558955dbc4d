//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Unique violations on the external id, username, and email indexes are
//! reported as [`UserPersistenceError::Duplicate`] carrying the constraint
//! name so the binder can recover from a lost first-bind race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl, scoped_futures::ScopedFutureExt};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ExternalUserId, User, UserId, UserProfile, Username};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{event_reservations, reviews, users, wishlist};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if let Some(ConstraintViolation::Unique(constraint)) = constraint_violation(&error) {
        return UserPersistenceError::duplicate(constraint);
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let external_id = ExternalUserId::new(&row.external_id)
        .map_err(|err| UserPersistenceError::query(format!("stored external id: {err}")))?;
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username: {err}")))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        external_id,
        UserProfile {
            username,
            display_name: row.display_name,
            email: row.email,
        },
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::external_id.eq(external_id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn list_external_ids(&self) -> Result<Vec<ExternalUserId>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<String> = users::table
            .select(users::external_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        raw.iter()
            .map(|id| {
                ExternalUserId::new(id)
                    .map_err(|err| UserPersistenceError::query(format!("stored external id: {err}")))
            })
            .collect()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            external_id: user.external_id().as_str(),
            username: user.username(),
            display_name: user.display_name(),
            email: user.email(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserProfileUpdate {
            username: user.username(),
            display_name: user.display_name(),
            email: user.email(),
        };
        let updated = diesel::update(users::table)
            .filter(users::external_id.eq(user.external_id().as_str()))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let external_id = external_id.as_str().to_owned();
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let Some(user_id) = users::table
                    .filter(users::external_id.eq(external_id.as_str()))
                    .select(users::id)
                    .first::<uuid::Uuid>(conn)
                    .await
                    .optional()?
                else {
                    return Ok(false);
                };
                let reviews_removed = diesel::delete(reviews::table)
                    .filter(reviews::user_id.eq(user_id))
                    .execute(conn)
                    .await?;
                let wishlist_removed = diesel::delete(wishlist::table)
                    .filter(wishlist::user_id.eq(user_id))
                    .execute(conn)
                    .await?;
                let reservations_removed = diesel::delete(event_reservations::table)
                    .filter(event_reservations::user_id.eq(user_id))
                    .execute(conn)
                    .await?;
                diesel::delete(users::table)
                    .filter(users::id.eq(user_id))
                    .execute(conn)
                    .await?;
                debug!(
                    %user_id,
                    reviews_removed,
                    wishlist_removed,
                    reservations_removed,
                    "deleted user and owned rows"
                );
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
