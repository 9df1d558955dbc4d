//! FAQ submissions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    QuestionCommand, QuestionQuery, QuestionRepository, QuestionRepositoryError,
};
use crate::domain::{Error, Question, QuestionDraft, QuestionId};

fn map_question_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message } => Error::service_unavailable(message),
        QuestionRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Repository-backed question command and query. Submissions are
/// anonymous and never bind a user.
#[derive(Clone)]
pub struct QuestionService<R> {
    questions: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> QuestionService<R> {
    pub fn new(questions: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { questions, clock }
    }
}

#[async_trait]
impl<R> QuestionCommand for QuestionService<R>
where
    R: QuestionRepository,
{
    async fn submit(&self, draft: QuestionDraft) -> Result<Question, Error> {
        let question = draft.into_question(QuestionId::random(), self.clock.utc());
        self.questions
            .insert(&question)
            .await
            .map_err(map_question_error)?;
        info!(question_id = %question.id, "stored question");
        Ok(question)
    }
}

#[async_trait]
impl<R> QuestionQuery for QuestionService<R>
where
    R: QuestionRepository,
{
    async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        self.questions.list().await.map_err(map_question_error)
    }
}
