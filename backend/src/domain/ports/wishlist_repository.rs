//! Port abstraction for wishlist persistence.
//!
//! Adapters enforce one entry per `(user, target type, target id)` and
//! report a collision as [`WishlistRepositoryError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{Target, TargetType, UserId, WishlistEntry};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by wishlist adapters.
    pub enum WishlistRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "wishlist repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "wishlist repository query failed: {message}",
        /// The target is already on this user's wishlist.
        Duplicate => "wishlist entry already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// The user's entry for a target, if saved.
    async fn find(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<Option<WishlistEntry>, WishlistRepositoryError>;

    /// Store a new entry.
    async fn insert(&self, entry: &WishlistEntry) -> Result<(), WishlistRepositoryError>;

    /// Delete the user's entry for a target; returns how many rows went.
    async fn delete(
        &self,
        user_id: &UserId,
        target: &Target,
    ) -> Result<usize, WishlistRepositoryError>;

    /// The user's entries, newest first, optionally narrowed to one type.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<WishlistEntry>, WishlistRepositoryError>;
}
