use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[garde(range(min = 1))]
    pub product_id: i64,
    #[serde(flatten)]
    #[garde(dive)]
    pub body: ReviewBody,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewBody {
    #[garde(range(min = 1, max = 5))]
    pub rating: i64,
    #[serde(default)]
    #[garde(length(max = 2000))]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub product_id: i64,
    pub average_rating: f64,
    pub review_count: i64,
}

impl RatingSummary {
    pub fn new(product_id: i64, average: Option<f64>, review_count: i64) -> Self {
        let average = average.unwrap_or(0.0);
        Self {
            product_id,
            average_rating: (average * 100.0).round() / 100.0,
            review_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_rounded_to_two_decimals() {
        assert_eq!(RatingSummary::new(1, Some(11.0 / 3.0), 3).average_rating, 3.67);
        assert_eq!(RatingSummary::new(1, Some(4.5), 2).average_rating, 4.5);
    }

    #[test]
    fn no_reviews_means_zero() {
        let summary = RatingSummary::new(9, None, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.review_count, 0);
    }
}
