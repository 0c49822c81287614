pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/categories", post(handlers::add_category))
        .route("/categories/tree", get(handlers::category_tree))
        .route("/categories/:id", delete(handlers::delete_category))
        .route("/categories/:id/name", post(handlers::rename_category))
        .route("/categories/:id/include", post(handlers::toggle_include))
}
