use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::dto::{AddCategoryRequest, CategoryNode, RenameCategoryRequest};
use super::repo::{self, Category};
use super::services::build_hierarchy;
use crate::error::AppError;
use crate::session::extractors::SessionAuth;
use crate::state::AppState;
use crate::validation::sanitize_string;

#[instrument(skip(state, _session))]
pub async fn list_categories(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(repo::list_all(&state.db).await?))
}

#[instrument(skip(state, _session))]
pub async fn category_tree(
    State(state): State<AppState>,
    _session: SessionAuth,
) -> Result<Json<Vec<CategoryNode>>, AppError> {
    let categories = repo::list_all(&state.db).await?;
    Ok(Json(build_hierarchy(&categories)))
}

#[instrument(skip(state, _session, body))]
pub async fn add_category(
    State(state): State<AppState>,
    _session: SessionAuth,
    Json(body): Json<AddCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let name = sanitize_string(&body.name, 255)
        .ok_or_else(|| AppError::BadRequest("Invalid category name".into()))?;
    if let Some(parent_id) = body.parent_id {
        if !repo::exists(&state.db, parent_id).await? {
            return Err(AppError::NotFound("parent category"));
        }
    }
    let created = repo::insert(&state.db, &name, body.parent_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, _session))]
pub async fn delete_category(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("category"));
    }
    // Children keep a live parent: the parent cannot be removed from under them.
    if repo::has_children(&state.db, id).await? {
        return Err(AppError::Conflict(
            "Category still has subcategories".into(),
        ));
    }
    repo::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session, body))]
pub async fn rename_category(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
    Json(body): Json<RenameCategoryRequest>,
) -> Result<StatusCode, AppError> {
    let new_name = sanitize_string(&body.new_name, 255)
        .ok_or_else(|| AppError::BadRequest("Invalid category name".into()))?;
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("category"));
    }
    repo::rename(&state.db, id, &new_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session))]
pub async fn toggle_include(
    State(state): State<AppState>,
    _session: SessionAuth,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !repo::exists(&state.db, id).await? {
        return Err(AppError::NotFound("category"));
    }
    repo::toggle_include_in_budget(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
