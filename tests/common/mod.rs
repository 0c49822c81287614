#![allow(dead_code)]

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use fintrack::config::{AppConfig, SessionConfig};
use fintrack::state::AppState;
use fintrack::transactions::repo::NewTransaction;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    fintrack::MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

pub fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        database_url: "sqlite::memory:".into(),
        session: SessionConfig {
            ttl_seconds: 3600,
            rate_limit: 100,
        },
    })
}

pub async fn test_state() -> AppState {
    AppState::from_parts(test_pool().await, test_config())
}

pub async fn seed_transaction(
    pool: &SqlitePool,
    date: &str,
    description: &str,
    amount: &str,
    category: i64,
) -> i64 {
    fintrack::transactions::repo::insert(
        pool,
        &NewTransaction {
            account_type: "Chequing".into(),
            transaction_date: date.into(),
            description: description.into(),
            amount: amount.into(),
            category: Some(category),
        },
    )
    .await
    .expect("seed transaction")
}
