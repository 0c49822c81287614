pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(handlers::list_transactions))
        .route("/transactions", post(handlers::add_transaction))
        .route("/transactions", delete(handlers::clear_transactions))
        .route("/transactions/months", get(handlers::transaction_months))
        .route("/transactions/:id", delete(handlers::delete_transaction))
        .route("/transactions/:id/category", post(handlers::assign_category))
        .route(
            "/transactions/:id/description",
            post(handlers::update_description),
        )
}
