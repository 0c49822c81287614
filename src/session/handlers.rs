use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use serde::Serialize;
use tracing::instrument;

use super::repo;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
}

/// GET /session — issue or reuse the caller IP's token.
#[instrument(skip(state))]
pub async fn issue_session(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Json<SessionResponse>, AppError> {
    let token = repo::issue_or_reuse(&state.db, &addr.ip().to_string(), &state.config.session).await?;
    Ok(Json(SessionResponse { token }))
}
