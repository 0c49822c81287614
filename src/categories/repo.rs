use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub include_in_budget: bool,
}

pub async fn list_all(db: &SqlitePool) -> Result<Vec<Category>, AppError> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id, include_in_budget FROM categories ORDER BY id",
    )
    .fetch_all(db)
    .await?;
    debug!(count = rows.len(), "categories retrieved");
    Ok(rows)
}

pub async fn get(db: &SqlitePool, category_id: i64) -> Result<Option<Category>, AppError> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, name, parent_id, include_in_budget FROM categories WHERE id = ?",
    )
    .bind(category_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn exists(db: &SqlitePool, category_id: i64) -> Result<bool, AppError> {
    Ok(get(db, category_id).await?.is_some())
}

/// New categories are included in the budget until toggled off.
pub async fn insert(
    db: &SqlitePool,
    name: &str,
    parent_id: Option<i64>,
) -> Result<Category, AppError> {
    let result = sqlx::query(
        "INSERT INTO categories (name, parent_id, include_in_budget) VALUES (?, ?, 1)",
    )
    .bind(name)
    .bind(parent_id)
    .execute(db)
    .await?;
    let id = result.last_insert_rowid();
    info!(%name, ?parent_id, id, "category inserted");
    Ok(Category {
        id,
        name: name.to_string(),
        parent_id,
        include_in_budget: true,
    })
}

pub async fn rename(db: &SqlitePool, category_id: i64, new_name: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
        .bind(new_name)
        .bind(category_id)
        .execute(db)
        .await?;
    info!(category_id, %new_name, "category renamed");
    Ok(())
}

pub async fn toggle_include_in_budget(db: &SqlitePool, category_id: i64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE categories
        SET include_in_budget = CASE WHEN include_in_budget = 1 THEN 0 ELSE 1 END
        WHERE id = ?
        "#,
    )
    .bind(category_id)
    .execute(db)
    .await?;
    info!(category_id, "category include_in_budget toggled");
    Ok(())
}

pub async fn has_children(db: &SqlitePool, category_id: i64) -> Result<bool, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM categories WHERE parent_id = ?",
    )
    .bind(category_id)
    .fetch_one(db)
    .await?;
    Ok(count > 0)
}

/// Deletes the category together with its budget row. Callers must refuse the
/// delete while children still reference the category.
pub async fn delete(db: &SqlitePool, category_id: i64) -> Result<(), AppError> {
    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM budgets WHERE category_id = ?")
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    info!(category_id, "category deleted");
    Ok(())
}
