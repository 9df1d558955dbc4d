//! Driving port listing the caller's tickets.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, ReservationWithEvent};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationQuery: Send + Sync {
    /// The caller's reservations, newest first, each joined with its event.
    /// Binds the caller on first sight.
    async fn list_reservations(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<Vec<ReservationWithEvent>, Error>;
}
