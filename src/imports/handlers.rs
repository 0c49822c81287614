use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use super::services;
use crate::error::AppError;
use crate::session::extractors::SessionAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub inserted: usize,
}

/// POST /imports/validate — body is the raw statement CSV. Checks only;
/// nothing is written.
#[instrument(skip(_session, body))]
pub async fn validate_statement(
    _session: SessionAuth,
    body: String,
) -> Result<Json<ValidateResponse>, AppError> {
    services::validate(&body)?;
    Ok(Json(ValidateResponse { success: true }))
}

/// POST /imports — parse, dedup and insert; responds with the insert count.
#[instrument(skip(state, _session, body))]
pub async fn import_statement(
    State(state): State<AppState>,
    _session: SessionAuth,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let inserted = services::ingest(&state.db, &body).await?;
    Ok(Json(ImportResponse { inserted }))
}
