use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::AppError;

/// Transaction joined with its category and the parent category's name, the
/// raw material for the graph aggregations.
#[derive(Debug, Clone, FromRow)]
pub struct GraphRow {
    pub transaction_date: Option<String>,
    pub amount: Option<String>,
    pub category_name: Option<String>,
    pub parent_name: Option<String>,
}

pub async fn rows(db: &SqlitePool) -> Result<Vec<GraphRow>, AppError> {
    let rows = sqlx::query_as::<_, GraphRow>(
        r#"
        SELECT t.transaction_date, t.amount, c.name AS category_name, p.name AS parent_name
        FROM transactions t
        LEFT JOIN categories c ON t.category = c.id
        LEFT JOIN categories p ON c.parent_id = p.id
        WHERE t.amount IS NOT NULL
        "#,
    )
    .fetch_all(db)
    .await?;
    debug!(count = rows.len(), "graph rows retrieved");
    Ok(rows)
}

/// Date/amount pairs for the income-vs-expense summary.
#[derive(Debug, Clone, FromRow)]
pub struct AmountRow {
    pub transaction_date: Option<String>,
    pub amount: Option<String>,
}

pub async fn amounts(db: &SqlitePool) -> Result<Vec<AmountRow>, AppError> {
    let rows = sqlx::query_as::<_, AmountRow>(
        "SELECT transaction_date, amount FROM transactions",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
