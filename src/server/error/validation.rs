use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::donation::QuantityUnit;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("quantity must be a positive number, got {0:?}")]
    InvalidQuantity(String),
    #[error("unknown quantity unit {0:?}, expected one of g, kg, ml, liter")]
    UnknownUnit(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("unknown donation status {0:?}")]
    UnknownDonationStatus(String),
    #[error("unknown request status {0:?}")]
    UnknownRequestStatus(String),
    #[error("requested quantity {0:?} does not start with a number")]
    UnparseableRequestedQuantity(String),
    #[error("requested unit {requested:?} does not match the donation unit {donation:?}")]
    UnitMismatch {
        requested: String,
        donation: QuantityUnit,
    },
    #[error("{field} {value:?} is not a valid date")]
    InvalidDate { field: &'static str, value: String },
    #[error("donation {0} does not exist")]
    UnknownDonation(i32),
    #[error("rate must be between 1 and 5, got {0}")]
    RateOutOfRange(i32),
    #[error("rating only allowed after completion")]
    RatingBeforeCompletion,
    #[error("malformed form data: {0}")]
    MalformedForm(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
