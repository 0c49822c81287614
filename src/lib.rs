pub mod app;
pub mod budgets;
pub mod categories;
pub mod config;
pub mod error;
pub mod graphs;
pub mod imports;
pub mod session;
pub mod state;
pub mod transactions;
pub mod validation;

/// Migrations embedded for both the binary and the integration tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
