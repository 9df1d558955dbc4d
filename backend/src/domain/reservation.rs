//! Ticket reservations.

use chrono::{DateTime, Utc};

use super::catalogue::Event;
use super::ids::{EventId, ReservationId, UserId};

/// Number of tickets in one reservation; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

/// Quantity below one or beyond what the store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("quantity must be a positive integer, got {0}")]
pub struct InvalidQuantity(pub i64);

impl Quantity {
    /// Largest quantity representable in the store.
    pub const MAX: u32 = i32::MAX.unsigned_abs();

    /// Validate a raw quantity.
    ///
    /// # Errors
    /// Rejects zero, negatives, and values above [`Quantity::MAX`].
    pub fn new(raw: i64) -> Result<Self, InvalidQuantity> {
        u32::try_from(raw)
            .ok()
            .filter(|value| (1..=Self::MAX).contains(value))
            .map(Self)
            .ok_or(InvalidQuantity(raw))
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(1)
    }
}

/// A stored reservation. Capacity is not consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

/// A reservation joined with the event it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationWithEvent {
    pub reservation: TicketReservation,
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(i64::from(i32::MAX) + 1)]
    fn rejects_non_positive_and_oversized(#[case] raw: i64) {
        assert_eq!(Quantity::new(raw), Err(InvalidQuantity(raw)));
    }

    #[test]
    fn defaults_to_a_single_ticket() {
        assert_eq!(Quantity::default().get(), 1);
        assert_eq!(Quantity::new(4).map(Quantity::get), Ok(4));
    }
}
