use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::AppError;
use crate::validation::year_month;

/// Transaction row joined with its category name. Amounts are kept as the
/// stored text; aggregators parse them and skip anything non-numeric.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub account_type: Option<String>,
    pub transaction_date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<i64>,
    pub category_name: Option<String>,
}

/// Fields for a manual insert; the routing layer has already shape-checked
/// the values (date is `YYYY-MM-DD`, strings are sanitized).
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_type: String,
    pub transaction_date: String,
    pub description: String,
    pub amount: String,
    pub category: Option<i64>,
}

/// Dedup key for the CSV importer: exact tuple match against existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRow)]
pub struct TransactionKey {
    pub account_type: String,
    pub transaction_date: String,
    pub description: String,
    pub amount: String,
}

pub async fn list_all(db: &SqlitePool) -> Result<Vec<Transaction>, AppError> {
    let rows = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT t.id, t.account_type, t.transaction_date, t.description,
               t.amount, t.category, c.name AS category_name
        FROM transactions t
        LEFT JOIN categories c ON t.category = c.id
        ORDER BY t.transaction_date DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    debug!(count = rows.len(), "transactions retrieved");
    Ok(rows)
}

pub async fn get(db: &SqlitePool, transaction_id: i64) -> Result<Option<Transaction>, AppError> {
    let row = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT t.id, t.account_type, t.transaction_date, t.description,
               t.amount, t.category, c.name AS category_name
        FROM transactions t
        LEFT JOIN categories c ON t.category = c.id
        WHERE t.id = ?
        "#,
    )
    .bind(transaction_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn exists(db: &SqlitePool, transaction_id: i64) -> Result<bool, AppError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM transactions WHERE id = ?")
        .bind(transaction_id)
        .fetch_optional(db)
        .await?;
    Ok(found.is_some())
}

pub async fn insert(db: &SqlitePool, new: &NewTransaction) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO transactions (account_type, transaction_date, description, amount, category)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.account_type)
    .bind(&new.transaction_date)
    .bind(&new.description)
    .bind(&new.amount)
    .bind(new.category.unwrap_or(1))
    .execute(db)
    .await?;
    let id = result.last_insert_rowid();
    info!(id, "transaction inserted");
    Ok(id)
}

pub async fn update_category(
    db: &SqlitePool,
    transaction_id: i64,
    category_id: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE transactions SET category = ? WHERE id = ?")
        .bind(category_id)
        .bind(transaction_id)
        .execute(db)
        .await?;
    info!(transaction_id, category_id, "transaction category updated");
    Ok(())
}

pub async fn update_description(
    db: &SqlitePool,
    transaction_id: i64,
    description: &str,
) -> Result<(), AppError> {
    sqlx::query("UPDATE transactions SET description = ? WHERE id = ?")
        .bind(description)
        .bind(transaction_id)
        .execute(db)
        .await?;
    info!(transaction_id, "transaction description updated");
    Ok(())
}

pub async fn delete(db: &SqlitePool, transaction_id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM transactions WHERE id = ?")
        .bind(transaction_id)
        .execute(db)
        .await?;
    info!(transaction_id, "transaction deleted");
    Ok(())
}

pub async fn clear_all(db: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("DELETE FROM transactions").execute(db).await?;
    info!("all transactions cleared");
    Ok(())
}

/// Distinct "YYYY-MM" buckets, newest first. Undated or malformed rows are
/// left out.
pub async fn months(db: &SqlitePool) -> Result<Vec<String>, AppError> {
    let dates =
        sqlx::query_scalar::<_, Option<String>>("SELECT transaction_date FROM transactions")
            .fetch_all(db)
            .await?;
    let mut months: Vec<String> = dates
        .into_iter()
        .flatten()
        .filter_map(|d| year_month(&d))
        .collect();
    months.sort();
    months.dedup();
    months.reverse();
    Ok(months)
}

pub async fn most_recent_month(db: &SqlitePool) -> Result<Option<String>, AppError> {
    let month = sqlx::query_scalar::<_, Option<String>>(
        "SELECT strftime('%Y-%m', MAX(transaction_date)) FROM transactions",
    )
    .fetch_one(db)
    .await?;
    debug!(?month, "most recent transaction month");
    Ok(month)
}

/// Existing rows keyed for import dedup.
pub async fn existing_keys(db: &SqlitePool) -> Result<Vec<TransactionKey>, AppError> {
    let rows = sqlx::query_as::<_, TransactionKey>(
        r#"
        SELECT IFNULL(account_type, '') AS account_type,
               IFNULL(transaction_date, '') AS transaction_date,
               IFNULL(description, '') AS description,
               IFNULL(amount, '') AS amount
        FROM transactions
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
