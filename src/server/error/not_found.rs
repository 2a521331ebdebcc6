use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("Donation {0} not found")]
    Donation(i32),
    #[error("Request {0} not found")]
    Request(i32),
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::NOT_FOUND, self.to_string())
    }
}
