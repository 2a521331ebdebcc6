//! Bearer token verification.
//!
//! Tokens are issued by the external identity provider and signed with the shared
//! `JWT_SECRET` (HS256). ShareFood only verifies them.

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::server::{error::auth::AuthError, model::auth::Claims};

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    match header.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(AuthError::MissingToken),
    }
}

/// Verifies `token` and returns the user ID in its `sub` claim.
pub fn verify_token(secret: &str, token: &str) -> Result<i32, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    data.claims.sub.parse::<i32>().map_err(|_| {
        AuthError::InvalidToken(format!("subject {:?} is not a user ID", data.claims.sub))
    })
}
