//! Port abstraction for ticket reservation persistence.

use async_trait::async_trait;

use crate::domain::{TicketReservation, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reservation adapters.
    pub enum ReservationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reservation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reservation repository query failed: {message}",
        /// The referenced event does not exist.
        UnknownEvent => "reservation references an unknown event",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store a reservation. The event must exist.
    async fn insert(&self, reservation: &TicketReservation)
    -> Result<(), ReservationRepositoryError>;

    /// The user's reservations, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TicketReservation>, ReservationRepositoryError>;
}
