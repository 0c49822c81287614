use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{AddTransactionRequest, AssignCategoryRequest, UpdateDescriptionRequest};
use super::repo::{self, NewTransaction, Transaction};
use crate::categories;
use crate::error::AppError;
use crate::session::extractors::SessionAuth;
use crate::state::AppState;
use crate::validation::{parse_iso_date, sanitize_string};

#[instrument(skip(state, _session))]
pub async fn list_transactions(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(repo::list_all(&state.db).await?))
}

#[instrument(skip(state, _session, body))]
pub async fn add_transaction(
    State(state): State<AppState>,
    _session: SessionAuth,
    Json(body): Json<AddTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let description = sanitize_string(&body.description, 500)
        .ok_or_else(|| AppError::BadRequest("Invalid description".into()))?;
    let account_type = sanitize_string(&body.account_type, 100)
        .ok_or_else(|| AppError::BadRequest("Invalid account type".into()))?;
    if parse_iso_date(&body.transaction_date).is_none() {
        return Err(AppError::BadRequest("Invalid transaction date".into()));
    }
    if !body.amount.is_finite() {
        return Err(AppError::BadRequest("Invalid amount".into()));
    }
    if let Some(category) = body.category {
        if !categories::repo::exists(&state.db, category).await? {
            return Err(AppError::NotFound("category"));
        }
    }

    let new = NewTransaction {
        account_type,
        transaction_date: body.transaction_date.clone(),
        description,
        amount: body.amount.to_string(),
        category: body.category,
    };
    let id = repo::insert(&state.db, &new).await?;
    let created = repo::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("transaction"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, _session, body))]
pub async fn assign_category(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
    Json(body): Json<AssignCategoryRequest>,
) -> Result<StatusCode, AppError> {
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("transaction"));
    }
    if !categories::repo::exists(&state.db, body.category_id).await? {
        return Err(AppError::NotFound("category"));
    }
    repo::update_category(&state.db, id, body.category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session, body))]
pub async fn update_description(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDescriptionRequest>,
) -> Result<StatusCode, AppError> {
    let description = sanitize_string(&body.description, 500)
        .ok_or_else(|| AppError::BadRequest("Invalid description".into()))?;
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("transaction"));
    }
    repo::update_description(&state.db, id, &description).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("transaction"));
    }
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session))]
pub async fn clear_transactions(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<StatusCode, AppError> {
    repo::clear_all(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session))]
pub async fn transaction_months(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(repo::months(&state.db).await?))
}
