//! Port abstraction for local user persistence.
//!
//! Adapters must enforce uniqueness of the external identifier, the
//! username, and non-empty emails, reporting collisions as
//! [`UserPersistenceError::Duplicate`] so callers can tell a lost race apart
//! from a broken store.

use async_trait::async_trait;

use crate::domain::{ExternalUserId, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "user already exists ({constraint})",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user bound to a provider identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Every stored provider identifier, in no particular order.
    async fn list_external_ids(&self) -> Result<Vec<ExternalUserId>, UserPersistenceError>;

    /// Insert a new user.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite the profile fields of the user with the same external id.
    ///
    /// Returns `false` when no such user exists.
    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Remove the user bound to a provider identifier together with the
    /// reviews, wishlist entries, and reservations they own.
    ///
    /// Returns `false` when no such user exists.
    async fn delete_by_external_id(
        &self,
        external_id: &ExternalUserId,
    ) -> Result<bool, UserPersistenceError>;
}
