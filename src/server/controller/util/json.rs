use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::{validation::ValidationError, Error};

/// A JSON request body whose rejections are reported as [`ValidationError::MalformedBody`].
///
/// Missing content type, invalid JSON or a body that does not fit `T` all become a `400`
/// with the usual `{"error": ...}` body instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

        Ok(Self(value))
    }
}
