use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::request::{CreateRequestDto, RequestDto, UpdateRequestStatusDto},
    server::{
        controller::util::{auth_user::AuthUser, json::JsonBody},
        error::{validation::ValidationError, Error},
        model::app::AppState,
        service::request::RequestService,
        util::parse::parse_request_status,
    },
};

/// Request part of a donation
///
/// # Responses
/// - 201 (Created): The stored request in `waiting` status
/// - 400 (Bad Request): Missing or malformed field, or unknown donation
/// - 403 (Forbidden): Donor requesting their own donation
/// - 409 (Conflict): Donation already completed or canceled
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreateRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let request = RequestService::new(&state.db, state.settings)
        .create(user.user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(RequestDto::from(request))))
}

pub async fn get_request(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let request = RequestService::new(&state.db, state.settings)
        .get(request_id)
        .await?;

    Ok((StatusCode::OK, Json(RequestDto::from(request))))
}

/// Move a request to a new status
///
/// # Responses
/// - 200 (OK): The request with its new status
/// - 400 (Bad Request): Malformed body, missing or unknown status, or unparseable quantity
/// - 403 (Forbidden): Caller may not perform this transition
/// - 404 (Not Found): No such request
/// - 409 (Conflict): Transition not allowed, donation already claimed, or concurrent change
pub async fn update_request_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(request_id): Path<i32>,
    JsonBody(payload): JsonBody<UpdateRequestStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let status = payload
        .status
        .ok_or(ValidationError::MissingField("status"))?;
    let status = parse_request_status(&status)?;

    let request = RequestService::new(&state.db, state.settings)
        .update_status(user.user_id, request_id, status)
        .await?;

    Ok((StatusCode::OK, Json(RequestDto::from(request))))
}
