//! PostgreSQL-backed `ReservationRepository` implementation.
//!
//! A foreign-key violation on the event column means the event is gone and
//! surfaces as [`ReservationRepositoryError::UnknownEvent`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{EventId, Quantity, ReservationId, TicketReservation, UserId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::ReservationRow;
use super::pool::{DbPool, PoolError};
use super::schema::event_reservations;

/// Diesel-backed implementation of the `ReservationRepository` port.
#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReservationRepositoryError {
    map_basic_pool_error(error, ReservationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReservationRepositoryError {
    if let Some(ConstraintViolation::ForeignKey(constraint)) = constraint_violation(&error)
        && constraint == "event_reservations_event_id_fkey"
    {
        return ReservationRepositoryError::unknown_event();
    }
    map_basic_diesel_error(
        error,
        ReservationRepositoryError::query,
        ReservationRepositoryError::connection,
    )
}

fn row_to_reservation(row: ReservationRow) -> Result<TicketReservation, ReservationRepositoryError> {
    let quantity = Quantity::new(i64::from(row.quantity)).map_err(|err| {
        ReservationRepositoryError::query(format!("stored reservation {}: {err}", row.id))
    })?;
    Ok(TicketReservation {
        id: ReservationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        event_id: EventId::from_uuid(row.event_id),
        quantity,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn insert(
        &self,
        reservation: &TicketReservation,
    ) -> Result<(), ReservationRepositoryError> {
        let quantity = i32::try_from(reservation.quantity.get())
            .map_err(|_| ReservationRepositoryError::query("quantity exceeds column range"))?;
        let row = ReservationRow {
            id: *reservation.id.as_uuid(),
            user_id: *reservation.user_id.as_uuid(),
            event_id: *reservation.event_id.as_uuid(),
            quantity,
            created_at: reservation.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(event_reservations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TicketReservation>, ReservationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        event_reservations::table
            .filter(event_reservations::user_id.eq(user_id.as_uuid()))
            .select(ReservationRow::as_select())
            .order_by(event_reservations::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_reservation)
            .collect()
    }
}
