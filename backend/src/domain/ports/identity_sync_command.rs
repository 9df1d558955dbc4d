//! Driving port applying user lifecycle notifications from the identity
//! provider.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, ExternalUserId, UserId};

/// Lifecycle notification translated from the provider's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySyncEvent {
    /// An account was created.
    Created(ExternalIdentity),
    /// An account's profile changed.
    Updated(ExternalIdentity),
    /// An account was removed.
    Deleted(ExternalUserId),
    /// A notification type this service does not act on.
    Ignored { event_type: String },
}

/// What applying a notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySyncOutcome {
    /// The identity is bound to this local user.
    Bound(UserId),
    /// The local user's profile was refreshed.
    Refreshed(UserId),
    /// A local user was removed, or there was none to remove.
    Deleted { removed: bool },
    /// Nothing was done.
    Ignored,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentitySyncCommand: Send + Sync {
    /// Apply one notification.
    async fn apply(&self, event: IdentitySyncEvent) -> Result<IdentitySyncOutcome, Error>;
}
