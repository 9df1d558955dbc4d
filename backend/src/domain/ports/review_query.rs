//! Driving port listing reviews of one target.

use async_trait::async_trait;

use crate::domain::{Error, Review, TargetId, TargetType};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Reviews for `target_id`, newest first.
    async fn list_reviews(
        &self,
        target_id: TargetId,
        target_type: Option<TargetType>,
    ) -> Result<Vec<Review>, Error>;
}
