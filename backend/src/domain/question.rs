//! Append-only FAQ submissions.

use chrono::{DateTime, Utc};

use super::ids::QuestionId;

/// Longest accepted question body, in characters.
pub const QUESTION_MAX: usize = 4_000;

/// A stored question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub name: String,
    pub email: Option<String>,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuestionDraftError {
    #[error("Name and question are required.")]
    MissingFields,
    #[error("question must be at most {QUESTION_MAX} characters")]
    TooLong,
}

/// Validated submission awaiting an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    name: String,
    email: Option<String>,
    question: String,
}

impl QuestionDraft {
    /// Validate raw form fields. Name and question are required after
    /// trimming; a blank email is treated as absent.
    ///
    /// # Errors
    /// Returns [`QuestionDraftError`] when a required field is blank or the
    /// question is oversized.
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        question: Option<String>,
    ) -> Result<Self, QuestionDraftError> {
        let name = name.as_deref().map(str::trim).unwrap_or_default();
        let question = question.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() || question.is_empty() {
            return Err(QuestionDraftError::MissingFields);
        }
        if question.chars().count() > QUESTION_MAX {
            return Err(QuestionDraftError::TooLong);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            question: question.to_owned(),
        })
    }

    /// Stamp the draft.
    #[must_use]
    pub fn into_question(self, id: QuestionId, created_at: DateTime<Utc>) -> Question {
        Question {
            id,
            name: self.name,
            email: self.email,
            question: self.question,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("When?"))]
    #[case(Some("  "), Some("When?"))]
    #[case(Some("Ana"), None)]
    #[case(Some("Ana"), Some(" "))]
    fn name_and_question_are_required(#[case] name: Option<&str>, #[case] question: Option<&str>) {
        let err = QuestionDraft::new(name.map(str::to_owned), None, question.map(str::to_owned))
            .expect_err("missing fields");
        assert_eq!(err.to_string(), "Name and question are required.");
    }

    #[test]
    fn blank_email_is_dropped() {
        let draft = QuestionDraft::new(
            Some("Ana".to_owned()),
            Some("   ".to_owned()),
            Some("Is parking available?".to_owned()),
        )
        .expect("valid draft");
        let question = draft.into_question(QuestionId::random(), chrono::Utc::now());
        assert_eq!(question.email, None);
        assert_eq!(question.question, "Is parking available?");
    }
}
