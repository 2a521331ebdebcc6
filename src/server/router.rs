//! HTTP routing configuration.
//!
//! Every endpoint lives under `/api` and requires a bearer token, see
//! [`crate::server::controller::util::auth_user::AuthUser`].

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::server::{controller, model::app::AppState};

/// Largest accepted request body, sized for a donation picture upload.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the application's HTTP router.
///
/// # Registered Endpoints
/// - `POST /api/donations` - Post a donation (multipart)
/// - `GET /api/donations` - List donations, `?status=` filter
/// - `GET /api/donations/{id}` - Get a donation
/// - `PATCH /api/donations/{id}` - Edit status and/or picture (multipart)
/// - `GET /api/donations/{id}/requests` - Requests made on a donation
/// - `GET /api/donations/{id}/ratings` - Ratings left on a donation
/// - `POST /api/requests` - Request a donation
/// - `GET /api/requests/{id}` - Get a request
/// - `PATCH /api/requests/{id}/status` - Transition a request
/// - `POST /api/ratings` - Rate a completed donation
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/donations",
            post(controller::donation::create_donation).get(controller::donation::list_donations),
        )
        .route(
            "/api/donations/{id}",
            get(controller::donation::get_donation).patch(controller::donation::update_donation),
        )
        .route(
            "/api/donations/{id}/requests",
            get(controller::donation::list_donation_requests),
        )
        .route(
            "/api/donations/{id}/ratings",
            get(controller::donation::list_donation_ratings),
        )
        .route("/api/requests", post(controller::request::create_request))
        .route("/api/requests/{id}", get(controller::request::get_request))
        .route(
            "/api/requests/{id}/status",
            patch(controller::request::update_request_status),
        )
        .route("/api/ratings", post(controller::rating::submit_rating))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
