pub mod handlers;
pub mod services;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/imports", post(handlers::import_statement))
        .route("/imports/validate", post(handlers::validate_statement))
}
