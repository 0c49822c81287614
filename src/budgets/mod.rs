pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(handlers::budget_status))
        .route("/budgets", post(handlers::update_budget))
}
