use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header with a bearer token is required")]
    MissingToken,
    #[error("Bearer token is invalid or expired: {0}")]
    InvalidToken(String),
    #[error("User ID {0:?} from a valid token was not found")]
    UserNotFound(i32),
    #[error("{0}")]
    Forbidden(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotFound(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::Forbidden(reason) => error_response(StatusCode::FORBIDDEN, reason),
        }
    }
}
