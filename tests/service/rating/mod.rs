//! Tests for RatingService.

mod submit;

use sharefood::model::rating::SubmitRatingDto;

fn rating_input(donation_id: i32, rate: i32) -> SubmitRatingDto {
    SubmitRatingDto {
        donation_id: Some(donation_id),
        rate: Some(rate),
        review: Some("Lovely bread, thank you".to_string()),
    }
}
