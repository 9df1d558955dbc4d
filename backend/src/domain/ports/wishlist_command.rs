//! Driving port for saving and unsaving targets.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, Target, WishlistAddOutcome};

/// Caller plus the target being saved or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistRequest {
    pub identity: ExternalIdentity,
    pub target: Target,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistCommand: Send + Sync {
    /// Save a target; repeating the call returns the stored entry.
    async fn add(&self, request: WishlistRequest) -> Result<WishlistAddOutcome, Error>;

    /// Unsave a target. Succeeds when nothing was saved.
    async fn remove(&self, request: WishlistRequest) -> Result<(), Error>;
}
