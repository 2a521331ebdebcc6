use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/ratings`
///
/// Fields are optional on the wire, a missing one is reported as a validation error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmitRatingDto {
    pub donation_id: Option<i32>,
    pub rate: Option<i32>,
    pub review: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingDto {
    pub rating_id: i32,
    pub donation_id: i32,
    pub user_id: i32,
    pub rate: i32,
    pub review: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::rating::Model> for RatingDto {
    fn from(model: entity::rating::Model) -> Self {
        Self {
            rating_id: model.rating_id,
            donation_id: model.donation_id,
            user_id: model.user_id,
            rate: model.rate,
            review: model.review,
            created_at: model.created_at,
        }
    }
}
