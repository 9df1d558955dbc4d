//! FAQ question endpoints. Submissions are anonymous.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Question, QuestionDraft, QuestionDraftError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuestionBody {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[schema(example = "Is there parking near the Athenaeum?")]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub question: String,
    pub created_at: String,
}

impl From<Question> for QuestionResponse {
    fn from(value: Question) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            question: value.question,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn draft_error(err: QuestionDraftError) -> Error {
    let field = match err {
        QuestionDraftError::MissingFields => None,
        QuestionDraftError::TooLong => Some("question"),
    };
    let error = Error::invalid_request(err.to_string());
    match field {
        Some(field) => error.with_details(serde_json::json!({ "field": field })),
        None => error,
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = QuestionBody,
    responses(
        (status = 201, description = "Question stored", body = QuestionResponse),
        (status = 400, description = "Name and question are required", body = ErrorSchema)
    ),
    tags = ["questions"],
    operation_id = "submitQuestion"
)]
#[post("/questions")]
pub async fn submit_question(
    state: web::Data<HttpState>,
    payload: web::Json<QuestionBody>,
) -> ApiResult<HttpResponse> {
    let QuestionBody {
        name,
        email,
        question,
    } = payload.into_inner();
    let draft = QuestionDraft::new(name, email, question).map_err(draft_error)?;
    let stored = state.questions.submit(draft).await?;
    Ok(HttpResponse::Created().json(QuestionResponse::from(stored)))
}

/// Every submitted question, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    responses((status = 200, description = "Questions", body = [QuestionResponse])),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<QuestionResponse>>> {
    let questions = state.questions_query.list_questions().await?;
    Ok(web::Json(questions.into_iter().map(Into::into).collect()))
}
