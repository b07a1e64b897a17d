//! Model description endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{Json, ModelResponse};

/// GET /v1/model
pub async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    let info = state.prediction_service.model_info();
    debug!(model = %info.name, features = info.features.len(), "Describing model");

    Json(ModelResponse::from_info(info))
}
