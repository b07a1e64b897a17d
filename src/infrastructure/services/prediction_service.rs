//! Prediction service - validate input, run the model, shape the result

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Assessment, ClassLabel, DomainError, FeatureInput, FeatureSchema, Predictor};
use crate::infrastructure::observability::{record_prediction, record_prediction_rejected};

/// What a client needs to build an input form
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classes: Vec<ClassLabel>,
    pub features: FeatureSchema,
}

/// Runs assessments against an injected predictor
#[derive(Debug, Clone)]
pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: self.predictor.name().to_string(),
            description: self.predictor.description().map(str::to_string),
            classes: self.predictor.classes().to_vec(),
            features: self.predictor.schema().clone(),
        }
    }

    /// A complete submission built from the schema's reference values
    pub fn reference_input(&self) -> FeatureInput {
        self.predictor.schema().reference_input()
    }

    /// Run the reference input through the model without recording it
    pub fn self_check(&self) -> Result<(), DomainError> {
        let vector = self.predictor.schema().encode(&self.reference_input())?;
        self.predictor.predict(&vector).map(|_| ())
    }

    /// Validate the submission and classify it.
    ///
    /// Invalid input is rejected before the model is invoked.
    pub fn assess(&self, input: &FeatureInput) -> Result<Assessment, DomainError> {
        let start = Instant::now();

        let vector = match self.predictor.schema().encode(input) {
            Ok(vector) => vector,
            Err(errors) => {
                record_prediction_rejected(self.predictor.name());
                debug!(errors = %errors, "Rejected prediction input");
                return Err(errors.into());
            }
        };

        debug!(features = ?vector.as_slice(), "Encoded feature vector");

        let prediction = self.predictor.predict(&vector)?;
        let assessment = Assessment::new(self.predictor.name(), prediction, self.predictor.classes());

        record_prediction(self.predictor.name(), &assessment.label, start.elapsed());

        info!(
            model = %assessment.model,
            label = %assessment.label,
            confidence = assessment.confidence,
            "Prediction completed"
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::mock::StubPredictor;
    use crate::domain::{FeatureDef, FeatureValue};

    fn stub() -> Arc<StubPredictor> {
        let schema = FeatureSchema::new(vec![
            FeatureDef::numeric("Age", 18.0, 100.0).integer().with_default(40.0),
            FeatureDef::categorical("History", &[("No", 0.0), ("None", 1.0), ("Yes", 2.0)]),
        ]);
        let classes = vec![
            ClassLabel::new("Benign").with_advice("Regular screenings are still recommended."),
            ClassLabel::new("Malignant").with_alert(true),
        ];

        Arc::new(StubPredictor::new(schema, classes).with_probabilities(vec![0.3, 0.7]))
    }

    #[test]
    fn test_assess_valid_input() {
        let predictor = stub();
        let service = PredictionService::new(predictor.clone());

        let mut input = FeatureInput::new();
        input.insert("Age".to_string(), FeatureValue::text("55"));
        input.insert("History".to_string(), FeatureValue::text("Yes"));

        let assessment = service.assess(&input).unwrap();
        assert_eq!(assessment.label, "Malignant");
        assert_eq!(assessment.model, "stub");
        assert!(assessment.alert);
        assert_eq!(assessment.confidence, 0.7);
        assert_eq!(predictor.calls(), 1);
    }

    #[test]
    fn test_incomplete_input_never_reaches_model() {
        let predictor = stub();
        let service = PredictionService::new(predictor.clone());

        let mut input = FeatureInput::new();
        input.insert("Age".to_string(), FeatureValue::Number(55.0));

        let result = service.assess(&input);
        assert!(matches!(result, Err(DomainError::InvalidFeatures(_))));
        assert_eq!(predictor.calls(), 0);
    }

    #[test]
    fn test_non_numeric_input_never_reaches_model() {
        let predictor = stub();
        let service = PredictionService::new(predictor.clone());

        let mut input = FeatureInput::new();
        input.insert("Age".to_string(), FeatureValue::text("forty"));
        input.insert("History".to_string(), FeatureValue::text("No"));

        assert!(service.assess(&input).is_err());
        assert_eq!(predictor.calls(), 0);
    }

    #[test]
    fn test_reference_input_assesses() {
        let service = PredictionService::new(stub());
        let reference = service.reference_input();

        assert_eq!(reference.get("Age"), Some(&FeatureValue::Number(40.0)));
        assert!(service.assess(&reference).is_ok());
    }

    #[test]
    fn test_self_check_calls_model() {
        let predictor = stub();
        let service = PredictionService::new(predictor.clone());

        assert!(service.self_check().is_ok());
        assert_eq!(predictor.calls(), 1);
    }

    #[test]
    fn test_model_info() {
        let info = PredictionService::new(stub()).model_info();
        assert_eq!(info.name, "stub");
        assert_eq!(info.features.len(), 2);
        assert_eq!(info.classes[0].name, "Benign");
    }
}
