//! Driving port for buying tickets.

use async_trait::async_trait;

use crate::domain::{Error, EventId, ExternalIdentity, Quantity, ReservationWithEvent};

/// Validated purchase request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveTicketRequest {
    pub identity: ExternalIdentity,
    pub event_id: EventId,
    pub quantity: Quantity,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationCommand: Send + Sync {
    /// Record a purchase for the caller and return it with the event.
    async fn reserve(&self, request: ReserveTicketRequest) -> Result<ReservationWithEvent, Error>;
}
