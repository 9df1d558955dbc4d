//! Driving port listing the caller's wishlist.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, TargetType, WishlistEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistQuery: Send + Sync {
    /// The caller's entries, newest first.
    async fn list_wishlist(
        &self,
        identity: &ExternalIdentity,
        target_type: Option<TargetType>,
    ) -> Result<Vec<WishlistEntry>, Error>;
}
