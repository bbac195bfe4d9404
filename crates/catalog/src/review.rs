//! Movie reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinegate_core::{DomainError, MovieId, ReviewId, UserId};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Client-side cache of a backend review record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub review_text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

/// A review being written, validated before it is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub review_text: String,
    pub rating: u8,
}

impl ReviewDraft {
    pub fn new(review_text: impl Into<String>, rating: u8) -> Self {
        Self {
            review_text: review_text.into(),
            rating,
        }
    }

    /// Deterministic validation; the backend re-validates as the authority.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.review_text.trim().is_empty() {
            return Err(DomainError::validation("review text must not be empty"));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_well_formed_draft_validates() {
        assert!(ReviewDraft::new("Loved it", 5).validate().is_ok());
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let err = ReviewDraft::new("Meh", 0).validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(ReviewDraft::new("Too good", 6).validate().is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(ReviewDraft::new("   ", 3).validate().is_err());
    }
}
