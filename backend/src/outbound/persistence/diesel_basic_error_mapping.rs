//! Shared Diesel error mapping for the repositories.
//!
//! Every adapter maps pool failures to its `Connection` variant and
//! unexpected Diesel failures to `Query`. Constraint violations the domain
//! reacts to are picked out first with [`constraint_violation`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Named constraint rejected by PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

/// Classify unique and foreign-key violations; other errors yield `None`.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().unwrap_or("unknown").to_owned();
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique(constraint)),
        DatabaseErrorKind::ForeignKeyViolation => {
            Some(ConstraintViolation::ForeignKey(constraint))
        }
        _ => None,
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Closed connections become connection errors; everything else is a query
/// error with a generic message. Details are logged at debug level.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        let mapped = map_basic_diesel_error(
            DieselError::NotFound,
            Mapped::Query,
            |msg| Mapped::Connection(msg.to_owned()),
        );
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        let mapped = map_basic_diesel_error(error, Mapped::Query, |msg| {
            Mapped::Connection(msg.to_owned())
        });
        assert_eq!(mapped, Mapped::Connection("database connection error".to_owned()));
    }

    #[rstest]
    fn pool_failures_keep_their_message() {
        let mapped: Mapped =
            map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn unique_violations_are_classified() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        assert_eq!(
            constraint_violation(&error),
            Some(ConstraintViolation::Unique("unknown".to_owned()))
        );
        assert_eq!(constraint_violation(&DieselError::NotFound), None);
    }
}
