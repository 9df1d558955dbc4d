//! Driving port for submitting reviews.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, Rating, Review, Target};

/// Validated review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    pub identity: ExternalIdentity,
    pub target: Target,
    pub rating: Rating,
    pub comment: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Append a review by the caller.
    async fn submit(&self, request: SubmitReviewRequest) -> Result<Review, Error>;
}
