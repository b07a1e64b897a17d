//! Prediction endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictionRequest, PredictionResponse};

/// POST /v1/predict
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    debug!(features = request.features.len(), "Prediction request");

    let assessment = state
        .prediction_service
        .assess(request.features)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(PredictionResponse::from_assessment(assessment)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::domain::prediction::mock::StubPredictor;
    use crate::domain::{ClassLabel, FeatureDef, FeatureInput, FeatureSchema, FeatureValue};
    use crate::infrastructure::services::PredictionService;

    fn state() -> AppState {
        let schema = FeatureSchema::new(vec![
            FeatureDef::numeric("Tumor Size (cm)", 0.0, 20.0),
            FeatureDef::categorical("Metastasis", &[("No", 0.0), ("None", 1.0), ("Yes", 2.0)]),
        ]);
        let classes = vec![ClassLabel::new("Benign"), ClassLabel::new("Malignant")];
        let predictor = StubPredictor::new(schema, classes).with_probabilities(vec![0.9, 0.1]);

        AppState::new(Arc::new(PredictionService::new(Arc::new(predictor))))
    }

    #[tokio::test]
    async fn test_create_prediction() {
        let mut features = FeatureInput::new();
        features.insert("Tumor Size (cm)".to_string(), FeatureValue::Number(1.5));
        features.insert("Metastasis".to_string(), FeatureValue::text("No"));

        let Json(response) = create_prediction(State(state()), Json(PredictionRequest { features }))
            .await
            .unwrap();

        assert_eq!(response.label, "Benign");
        assert_eq!(response.class_index, 0);
        assert_eq!(response.probabilities.len(), 2);
    }

    #[tokio::test]
    async fn test_create_prediction_rejects_unknown_option() {
        let mut features = FeatureInput::new();
        features.insert("Tumor Size (cm)".to_string(), FeatureValue::Number(1.5));
        features.insert("Metastasis".to_string(), FeatureValue::text("Maybe"));

        let error = create_prediction(State(state()), Json(PredictionRequest { features }))
            .await
            .unwrap_err();

        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
