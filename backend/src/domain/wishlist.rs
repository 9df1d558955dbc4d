//! Save-for-later markers.

use chrono::{DateTime, Utc};

use super::ids::{UserId, WishlistEntryId};
use super::target::Target;

/// A saved target. At most one entry exists per `(user, target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub user_id: UserId,
    pub target: Target,
    pub created_at: DateTime<Utc>,
}

/// Result of an idempotent add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistAddOutcome {
    /// A new entry was stored.
    Created(WishlistEntry),
    /// The target was already saved; the stored entry is returned unchanged.
    AlreadySaved(WishlistEntry),
}

impl WishlistAddOutcome {
    /// The entry, whichever way it was obtained.
    #[must_use]
    pub const fn entry(&self) -> &WishlistEntry {
        match self {
            Self::Created(entry) | Self::AlreadySaved(entry) => entry,
        }
    }

    /// Whether this call stored a new entry.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
