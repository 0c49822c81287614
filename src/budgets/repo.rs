use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::AppError;

/// Spend-vs-budget line for one category in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BudgetStatus {
    pub category_id: i64,
    pub category: String,
    pub parent_id: Option<i64>,
    pub budget: f64,
    pub spent: f64,
}

/// At most one budget row per category: insert-or-update on conflict.
pub async fn upsert(db: &SqlitePool, category_id: i64, amount: f64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO budgets (category_id, amount)
        VALUES (?, ?)
        ON CONFLICT(category_id) DO UPDATE SET amount = excluded.amount
        "#,
    )
    .bind(category_id)
    .bind(amount)
    .execute(db)
    .await?;
    info!(category_id, amount, "budget updated");
    Ok(())
}

/// Budget vs spend for every category whose effective include flag is set.
///
/// A child's inclusion comes from its parent when it has one. Spend is the sum
/// of absolute amounts in that exact category for the month; child spend does
/// not roll up to the parent here.
pub async fn status(db: &SqlitePool, month: &str) -> Result<Vec<BudgetStatus>, AppError> {
    let rows = sqlx::query_as::<_, BudgetStatus>(
        r#"
        SELECT
            c.id AS category_id,
            c.name AS category,
            c.parent_id,
            IFNULL(b.amount, 0.00) AS budget,
            IFNULL((
                SELECT SUM(ABS(t.amount))
                FROM transactions t
                WHERE t.category = c.id
                AND strftime('%Y-%m', t.transaction_date) = ?
            ), 0.00) AS spent
        FROM categories c
        LEFT JOIN categories p ON c.parent_id = p.id
        LEFT JOIN budgets b ON b.category_id = c.id
        WHERE COALESCE(p.include_in_budget, c.include_in_budget) = 1
        "#,
    )
    .bind(month)
    .fetch_all(db)
    .await?;
    debug!(%month, count = rows.len(), "budget status retrieved");
    Ok(rows)
}
