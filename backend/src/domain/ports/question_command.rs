//! Driving port for FAQ submissions.

use async_trait::async_trait;

use crate::domain::{Error, Question, QuestionDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Append a validated submission.
    async fn submit(&self, draft: QuestionDraft) -> Result<Question, Error>;
}
