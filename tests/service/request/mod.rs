//! Tests for RequestService.

mod create;

use chrono::{Duration, Utc};
use sharefood::model::request::CreateRequestDto;

fn request_input(donation_id: i32, requested_quantity: &str) -> CreateRequestDto {
    CreateRequestDto {
        donation_id: Some(donation_id),
        requested_quantity: Some(requested_quantity.to_string()),
        pickup_time: Some((Utc::now() + Duration::hours(4)).to_rfc3339()),
        note: Some("Picking up for the shelter".to_string()),
    }
}
