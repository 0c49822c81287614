pub mod handlers;
pub mod repo;
pub mod services;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/graphs/monthly", get(handlers::monthly_breakdown))
        .route("/graphs/summary", get(handlers::income_expense_summary))
        .route("/graphs/months", get(handlers::available_months))
}
