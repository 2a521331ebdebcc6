use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::server::{
    error::{auth::AuthError, Error},
    model::app::AppState,
    service::{
        auth::{bearer_token, verify_token},
        user::UserService,
    },
};

/// The authenticated caller.
///
/// Resolved from the bearer token, the user must also exist in the users table.
///
/// # Rejections
/// - `401` - Missing or invalid token, or a token for a user that no longer exists
/// - `500` - Database failure while looking up the user
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = bearer_token(header)?;
        let user_id = verify_token(&state.jwt_secret, token)?;

        let Some(user) = UserService::new(&state.db).get_user(user_id).await? else {
            tracing::debug!(
                "Rejected token for user ID {} which was not found in database",
                user_id
            );

            return Err(AuthError::UserNotFound(user_id).into());
        };

        Ok(Self {
            user_id: user.user_id,
        })
    }
}
