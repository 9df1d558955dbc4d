//! Driving port listing FAQ submissions.

use async_trait::async_trait;

use crate::domain::{Error, Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// Every submission, newest first.
    async fn list_questions(&self) -> Result<Vec<Question>, Error>;
}
