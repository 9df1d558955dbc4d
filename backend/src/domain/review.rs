//! Ratings and comments attached to catalogue entries.

use chrono::{DateTime, Utc};

use super::ids::{ReviewId, UserId};
use super::target::Target;

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating.
pub const RATING_MAX: u8 = 5;
/// Longest accepted comment, in characters.
pub const COMMENT_MAX: usize = 2_000;

/// Star rating between [`RATING_MIN`] and [`RATING_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

/// Rating outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {RATING_MIN} and {RATING_MAX}, got {0}")]
pub struct RatingOutOfRange(pub i64);

impl Rating {
    /// Validate a raw rating.
    ///
    /// # Errors
    /// Rejects zero, negatives, and anything above [`RATING_MAX`].
    pub fn new(raw: i64) -> Result<Self, RatingOutOfRange> {
        u8::try_from(raw)
            .ok()
            .filter(|value| (RATING_MIN..=RATING_MAX).contains(value))
            .map(Self)
            .ok_or(RatingOutOfRange(raw))
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// A stored review. Users may review the same target more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub target: Target,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_the_closed_range(#[case] raw: i64) {
        let rating = Rating::new(raw).expect("in range");
        assert_eq!(i64::from(rating.value()), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(6)]
    #[case(300)]
    fn rejects_everything_else(#[case] raw: i64) {
        assert_eq!(Rating::new(raw), Err(RatingOutOfRange(raw)));
    }
}
