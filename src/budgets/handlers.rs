use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{BudgetQuery, UpdateBudgetRequest};
use super::repo::{self, BudgetStatus};
use crate::categories;
use crate::error::AppError;
use crate::session::extractors::SessionAuth;
use crate::state::AppState;
use crate::transactions;

/// GET /budgets?month=YYYY-MM — defaults to the most recent transaction month.
#[instrument(skip(state, _session))]
pub async fn budget_status(
    State(state): State<AppState>,
    _session: SessionAuth,
    Query(query): Query<BudgetQuery>,
) -> Result<Json<Vec<BudgetStatus>>, AppError> {
    let month = match query.month {
        Some(month) => month,
        None => transactions::repo::most_recent_month(&state.db)
            .await?
            .unwrap_or_default(),
    };
    Ok(Json(repo::status(&state.db, &month).await?))
}

#[instrument(skip(state, _session, body))]
pub async fn update_budget(
    State(state): State<AppState>,
    _session: SessionAuth,
    Json(body): Json<UpdateBudgetRequest>,
) -> Result<StatusCode, AppError> {
    if !body.amount.is_finite() {
        return Err(AppError::BadRequest("Invalid amount".into()));
    }
    if !categories::repo::exists(&state.db, body.category_id).await? {
        return Err(AppError::NotFound("category"));
    }
    repo::upsert(&state.db, body.category_id, body.amount).await?;
    Ok(StatusCode::NO_CONTENT)
}
