//! Prediction API types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Assessment, ClassLabel, ClassProbability, FeatureDef, FeatureInput, FeatureValue,
};
use crate::infrastructure::services::ModelInfo;

/// POST /v1/predict body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub features: FeatureInput,
}

/// POST /v1/predict response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub label: String,
    pub class_index: usize,
    pub confidence: f64,
    pub alert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    pub probabilities: Vec<ClassProbability>,
}

impl PredictionResponse {
    pub fn from_assessment(assessment: Assessment) -> Self {
        Self {
            id: format!("pred-{}", Uuid::new_v4()),
            object: "prediction".to_string(),
            created: chrono::Utc::now().timestamp(),
            model: assessment.model,
            label: assessment.label,
            class_index: assessment.class_index,
            confidence: assessment.confidence,
            alert: assessment.alert,
            advice: assessment.advice,
            probabilities: assessment.probabilities,
        }
    }
}

/// A feature as the UI renders it
#[derive(Debug, Clone, Serialize)]
pub struct FeatureField {
    #[serde(flatten)]
    pub definition: FeatureDef,
    pub display_label: String,
    /// Value the form starts with
    pub initial: FeatureValue,
}

/// GET /v1/model response
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub object: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classes: Vec<ClassLabel>,
    pub features: Vec<FeatureField>,
}

impl ModelResponse {
    pub fn from_info(info: ModelInfo) -> Self {
        let features = info
            .features
            .features()
            .iter()
            .map(|f| FeatureField {
                display_label: f.display_label().to_string(),
                initial: f.reference_value(),
                definition: f.clone(),
            })
            .collect();

        Self {
            object: "model".to_string(),
            name: info.name,
            description: info.description,
            classes: info.classes,
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureSchema, Prediction};

    #[test]
    fn test_request_deserialization() {
        let request: PredictionRequest = serde_json::from_str(
            r#"{"features": {"Age": 40, "Breast Quadrant": "Upper outer"}}"#,
        )
        .unwrap();

        assert_eq!(request.features.len(), 2);
        assert_eq!(
            request.features.get("Breast Quadrant"),
            Some(&FeatureValue::text("Upper outer"))
        );
    }

    #[test]
    fn test_response_from_assessment() {
        let classes = vec![ClassLabel::new("Benign"), ClassLabel::new("Malignant")];
        let prediction = Prediction::from_probabilities(vec![0.85, 0.15], &classes).unwrap();
        let assessment = Assessment::new("breast-cancer-risk", prediction, &classes);

        let response = PredictionResponse::from_assessment(assessment);
        assert!(response.id.starts_with("pred-"));
        assert_eq!(response.object, "prediction");
        assert_eq!(response.label, "Benign");
        assert_eq!(response.confidence, 0.85);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"object\":\"prediction\""));
        assert!(!json.contains("advice"));
    }

    #[test]
    fn test_model_response_fields() {
        let info = ModelInfo {
            name: "breast-cancer-risk".to_string(),
            description: None,
            classes: vec![ClassLabel::new("Benign"), ClassLabel::new("Malignant")],
            features: FeatureSchema::new(vec![
                FeatureDef::numeric("Age", 18.0, 100.0)
                    .integer()
                    .with_default(40.0),
                FeatureDef::categorical("Menopause", &[("No", 0.0), ("Yes", 1.0)])
                    .with_label("Menopause status"),
            ]),
        };

        let json = serde_json::to_value(ModelResponse::from_info(info)).unwrap();
        let features = json["features"].as_array().unwrap();

        assert_eq!(features[0]["name"], "Age");
        assert_eq!(features[0]["kind"]["type"], "numeric");
        assert_eq!(features[0]["initial"], 40.0);
        assert_eq!(features[1]["display_label"], "Menopause status");
        assert_eq!(features[1]["initial"], "No");
        assert_eq!(features[1]["kind"]["options"][1]["label"], "Yes");
    }
}
