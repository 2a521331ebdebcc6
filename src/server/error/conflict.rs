use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::{donation::DonationStatus, request::RequestStatus};
use thiserror::Error;

use crate::server::error::error_response;

/// The requested change clashes with the current state of a record.
///
/// Callers may re-read the record and retry, the engine never retries these itself.
#[derive(Error, Debug)]
pub enum ConflictError {
    #[error("request cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("donation {donation_id} is {status:?} and can no longer be claimed")]
    DonationUnavailable {
        donation_id: i32,
        status: DonationStatus,
    },
    #[error("donation {donation_id} is already claimed by approved request {request_id}")]
    DonationClaimed { donation_id: i32, request_id: i32 },
    #[error("donation {donation_id} is {status:?}, its status can only be edited while available")]
    DonationNotEditable {
        donation_id: i32,
        status: DonationStatus,
    },
    #[error("donors can only cancel a donation, not move it to {to:?}")]
    DonorTransitionNotAllowed {
        donation_id: i32,
        to: DonationStatus,
    },
    #[error("{entity} {id} was modified concurrently, please retry")]
    StaleWrite { entity: &'static str, id: i32 },
    #[error("user {user_id} already rated donation {donation_id}")]
    AlreadyRated { donation_id: i32, user_id: i32 },
}

impl IntoResponse for ConflictError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::CONFLICT, self.to_string())
    }
}
