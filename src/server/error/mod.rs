//! Error types for the ShareFood server.
//!
//! Domain errors are split by how callers should react to them: malformed input
//! ([`ValidationError`]), missing entities ([`NotFoundError`]), state or concurrency
//! conflicts ([`ConflictError`]) and identity problems ([`AuthError`]). Store and
//! collaborator failures are kept as their library error types. Every error implements
//! `IntoResponse` so controllers can return `Result<_, Error>` directly.

pub mod auth;
pub mod config;
pub mod conflict;
pub mod not_found;
pub mod retry;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, conflict::ConflictError, not_found::NotFoundError,
        validation::ValidationError,
    },
};

/// Main error type for the ShareFood server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Missing/invalid bearer token or an action the caller does not own.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Malformed or out-of-range input, never retried.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Referenced donation or request does not exist.
    #[error(transparent)]
    NotFoundError(#[from] NotFoundError),
    /// Transition not allowed from the current state, or a concurrent writer won.
    #[error(transparent)]
    ConflictError(#[from] ConflictError),
    /// The image host answered with an unusable response.
    #[error("Image host request failed: {0}")]
    ImageHostError(String),
    /// HTTP transport error talking to the image host.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Maps domain errors to their status codes, everything else becomes a 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::NotFoundError(err) => err.into_response(),
            Self::ConflictError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds the JSON error body shared by every error response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged, the client only receives a generic message so that store or
/// collaborator details are not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
