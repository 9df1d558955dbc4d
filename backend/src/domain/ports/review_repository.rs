//! Port abstraction for review persistence.

use async_trait::async_trait;

use crate::domain::{Review, TargetId, TargetType};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Append a review.
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Reviews for a target id, newest first, optionally narrowed to one
    /// target type.
    async fn list_for_target(
        &self,
        target_id: &TargetId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;
}
