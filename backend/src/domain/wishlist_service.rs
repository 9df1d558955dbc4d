//! Wishlist of saved events and locations.
//!
//! Adding is idempotent: the stored entry is returned when the caller has
//! already saved the target, including when a concurrent add wins the
//! unique index.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    IdentityBinding, WishlistCommand, WishlistQuery, WishlistRepository, WishlistRepositoryError,
    WishlistRequest,
};
use crate::domain::{
    Error, ExternalIdentity, Target, TargetType, UserId, WishlistAddOutcome, WishlistEntry,
    WishlistEntryId,
};

fn map_wishlist_error(error: WishlistRepositoryError) -> Error {
    match error {
        WishlistRepositoryError::Connection { message } => Error::service_unavailable(message),
        WishlistRepositoryError::Query { message } => Error::internal(message),
        WishlistRepositoryError::Duplicate => Error::conflict("wishlist entry already exists"),
    }
}

/// Repository-backed wishlist command and query.
#[derive(Clone)]
pub struct WishlistService<R> {
    binder: Arc<dyn IdentityBinding>,
    wishlist: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> WishlistService<R> {
    /// Create the service.
    pub fn new(binder: Arc<dyn IdentityBinding>, wishlist: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            binder,
            wishlist,
            clock,
        }
    }
}

impl<R> WishlistService<R>
where
    R: WishlistRepository,
{
    async fn find(&self, user_id: &UserId, target: &Target) -> Result<Option<WishlistEntry>, Error> {
        self.wishlist
            .find(user_id, target)
            .await
            .map_err(map_wishlist_error)
    }
}

#[async_trait]
impl<R> WishlistCommand for WishlistService<R>
where
    R: WishlistRepository,
{
    async fn add(&self, request: WishlistRequest) -> Result<WishlistAddOutcome, Error> {
        let user = self.binder.bind(&request.identity).await?;
        if let Some(existing) = self.find(&user.id(), &request.target).await? {
            return Ok(WishlistAddOutcome::AlreadySaved(existing));
        }

        let entry = WishlistEntry {
            id: WishlistEntryId::random(),
            user_id: user.id(),
            target: request.target,
            created_at: self.clock.utc(),
        };
        match self.wishlist.insert(&entry).await {
            Ok(()) => {
                info!(
                    user_id = %user.id(),
                    target_type = %entry.target.target_type,
                    target_id = %entry.target.target_id,
                    "saved wishlist entry"
                );
                Ok(WishlistAddOutcome::Created(entry))
            }
            Err(WishlistRepositoryError::Duplicate) => self
                .find(&user.id(), &entry.target)
                .await?
                .map(WishlistAddOutcome::AlreadySaved)
                .ok_or_else(|| map_wishlist_error(WishlistRepositoryError::duplicate())),
            Err(other) => Err(map_wishlist_error(other)),
        }
    }

    async fn remove(&self, request: WishlistRequest) -> Result<(), Error> {
        let user = self.binder.bind(&request.identity).await?;
        let removed = self
            .wishlist
            .delete(&user.id(), &request.target)
            .await
            .map_err(map_wishlist_error)?;
        debug!(user_id = %user.id(), removed, "removed wishlist entries");
        Ok(())
    }
}

#[async_trait]
impl<R> WishlistQuery for WishlistService<R>
where
    R: WishlistRepository,
{
    async fn list_wishlist(
        &self,
        identity: &ExternalIdentity,
        target_type: Option<TargetType>,
    ) -> Result<Vec<WishlistEntry>, Error> {
        let user = self.binder.bind(identity).await?;
        self.wishlist
            .list_for_user(&user.id(), target_type)
            .await
            .map_err(map_wishlist_error)
    }
}
