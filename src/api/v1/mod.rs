//! v1 API endpoints

pub mod model;
pub mod predict;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/model", get(model::get_model))
        .route("/predict", post(predict::create_prediction))
}
