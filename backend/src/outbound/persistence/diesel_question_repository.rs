//! PostgreSQL-backed `QuestionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{Question, QuestionId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::QuestionRow;
use super::pool::{DbPool, PoolError};
use super::schema::questions;

#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, QuestionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<(), QuestionRepositoryError> {
        let row = QuestionRow {
            id: *question.id.as_uuid(),
            name: question.name.clone(),
            email: question.email.clone(),
            question: question.question.clone(),
            created_at: question.created_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(questions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<QuestionRow> = questions::table
            .select(QuestionRow::as_select())
            .order_by(questions::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| Question {
                id: QuestionId::from_uuid(row.id),
                name: row.name,
                email: row.email,
                question: row.question,
                created_at: row.created_at,
            })
            .collect())
    }
}
