use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::repo;
use super::services::{self, Breakdown, MonthSummary};
use crate::error::AppError;
use crate::session::extractors::SessionAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[instrument(skip(state, _session))]
pub async fn monthly_breakdown(
    State(state): State<AppState>,
    _session: SessionAuth,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Breakdown>, AppError> {
    let rows = repo::rows(&state.db).await?;
    Ok(Json(services::monthly_breakdown(
        &rows,
        query.month.as_deref(),
    )))
}

#[instrument(skip(state, _session))]
pub async fn income_expense_summary(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<MonthSummary>>, AppError> {
    let rows = repo::amounts(&state.db).await?;
    Ok(Json(services::income_expense_summary(&rows)))
}

#[instrument(skip(state, _session))]
pub async fn available_months(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<String>>, AppError> {
    let rows = repo::amounts(&state.db).await?;
    Ok(Json(services::available_months(&rows)))
}
