use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::repo::{self, TokenStatus};
use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "X-Session-Token";

/// Extracts the `X-Session-Token` header and validates it against the store,
/// counting the request toward the token's rate-limit window.
#[derive(Debug)]
pub struct SessionAuth(pub String);

#[async_trait]
impl FromRequestParts<AppState> for SessionAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::InvalidToken)?
            .to_string();

        match repo::validate_and_track(&state.db, &token).await? {
            TokenStatus::Valid => Ok(SessionAuth(token)),
            TokenStatus::Invalid => Err(AppError::InvalidToken),
            TokenStatus::Expired => Err(AppError::ExpiredToken),
            TokenStatus::RateLimited => Err(AppError::RateLimited),
        }
    }
}
