//! Port abstraction for the FAQ submission log.

use async_trait::async_trait;

use crate::domain::Question;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by question adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Append a submission.
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError>;

    /// Every submission, newest first.
    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError>;
}
