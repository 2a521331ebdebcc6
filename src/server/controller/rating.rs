use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::rating::{RatingDto, SubmitRatingDto},
    server::{
        controller::util::{auth_user::AuthUser, json::JsonBody},
        error::Error,
        model::app::AppState,
        service::rating::RatingService,
    },
};

/// Rate a completed donation
///
/// # Responses
/// - 201 (Created): The stored rating
/// - 400 (Bad Request): Malformed body, donation not completed, unknown donation or bad rate
/// - 403 (Forbidden): Donor rating their own donation
/// - 409 (Conflict): Caller already rated this donation
pub async fn submit_rating(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<SubmitRatingDto>,
) -> Result<impl IntoResponse, Error> {
    let rating = RatingService::new(&state.db)
        .submit(user.user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(RatingDto::from(rating))))
}
