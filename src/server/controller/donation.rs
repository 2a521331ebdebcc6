use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{donation::DonationDto, rating::RatingDto, request::RequestDto},
    server::{
        controller::util::{auth_user::AuthUser, form::read_form},
        error::Error,
        model::app::AppState,
        service::{
            donation::{CreateDonationInput, DonationService, UpdateDonationInput},
            rating::RatingService,
            request::RequestService,
        },
        util::parse::parse_donation_status,
    },
};

#[derive(Deserialize)]
pub struct DonationListParams {
    pub status: Option<String>,
}

/// Post a new donation
///
/// Multipart form with `title`, `description`, `location`, `quantity_value`,
/// `quantity_unit` (`g`, `kg`, `ml` or `liter`), `expiry_date`, `category` and an
/// optional `picture` file.
///
/// # Responses
/// - 201 (Created): The stored donation, quantity in its canonical unit
/// - 400 (Bad Request): Missing or malformed field
/// - 401 (Unauthorized): Missing or invalid bearer token
/// - 500 (Internal Server Error): Database or image host failure
pub async fn create_donation(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let mut form = read_form(multipart).await?;

    let input = CreateDonationInput {
        title: form.take("title"),
        description: form.take("description"),
        location: form.take("location"),
        quantity_value: form.take("quantity_value"),
        quantity_unit: form.take("quantity_unit"),
        expiry_date: form.take("expiry_date"),
        category: form.take("category"),
        picture: form.picture.take(),
    };

    let donation = DonationService::new(&state.db, &state.image_host)
        .create(user.user_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(DonationDto::from(donation))))
}

/// List donations newest first, optionally filtered with `?status=`
pub async fn list_donations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DonationListParams>,
) -> Result<impl IntoResponse, Error> {
    let status = params
        .status
        .as_deref()
        .map(parse_donation_status)
        .transpose()?;

    let donations = DonationService::new(&state.db, &state.image_host)
        .list(status)
        .await?;

    let donation_dtos: Vec<DonationDto> = donations.into_iter().map(DonationDto::from).collect();

    Ok((StatusCode::OK, Json(donation_dtos)))
}

pub async fn get_donation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(donation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let donation = DonationService::new(&state.db, &state.image_host)
        .get(donation_id)
        .await?;

    Ok((StatusCode::OK, Json(DonationDto::from(donation))))
}

/// Edit a donation's status and/or picture
///
/// Multipart form with optional `status` and `picture`. Only the donor may edit, and the
/// status only while the donation is still available.
///
/// # Responses
/// - 200 (OK): The donation after the edit
/// - 400 (Bad Request): Unknown status value
/// - 403 (Forbidden): Caller is not the donor
/// - 404 (Not Found): No such donation
/// - 409 (Conflict): Status edit on a donation that is no longer available
pub async fn update_donation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(donation_id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let mut form = read_form(multipart).await?;

    let status = form
        .take("status")
        .filter(|status| !status.trim().is_empty())
        .map(|status| parse_donation_status(&status))
        .transpose()?;

    let input = UpdateDonationInput {
        status,
        picture: form.picture.take(),
    };

    let donation = DonationService::new(&state.db, &state.image_host)
        .update(user.user_id, donation_id, input)
        .await?;

    Ok((StatusCode::OK, Json(DonationDto::from(donation))))
}

/// List a donation's requests oldest first
pub async fn list_donation_requests(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(donation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let requests = RequestService::new(&state.db, state.settings)
        .list_for_donation(donation_id)
        .await?;

    let request_dtos: Vec<RequestDto> = requests.into_iter().map(RequestDto::from).collect();

    Ok((StatusCode::OK, Json(request_dtos)))
}

/// List a donation's ratings newest first
pub async fn list_donation_ratings(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(donation_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let ratings = RatingService::new(&state.db)
        .list_for_donation(donation_id)
        .await?;

    let rating_dtos: Vec<RatingDto> = ratings.into_iter().map(RatingDto::from).collect();

    Ok((StatusCode::OK, Json(rating_dtos)))
}
