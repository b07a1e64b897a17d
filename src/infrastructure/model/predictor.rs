//! Predictor backed by a model artifact loaded from disk

use std::path::Path;

use tracing::{debug, info};

use super::classifier::predict_proba;
use crate::domain::{
    ClassLabel, DomainError, FeatureSchema, FeatureVector, LoadError, ModelArtifact, Prediction,
    Predictor,
};
use crate::domain::artifact::validate_artifact;

/// Classifier loaded once at startup and never mutated
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    artifact: ModelArtifact,
}

impl ArtifactPredictor {
    /// Load and validate the artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading model artifact");

        let artifact = ModelArtifact::load(path)?;

        info!(
            path = %path.display(),
            model = %artifact.name,
            classifier = artifact.classifier.kind(),
            features = artifact.features.len(),
            classes = artifact.classes.len(),
            "Model artifact loaded"
        );

        Ok(Self { artifact })
    }

    /// Validate an artifact built or parsed elsewhere
    pub fn new(artifact: ModelArtifact) -> Result<Self, LoadError> {
        validate_artifact(&artifact)?;
        Ok(Self { artifact })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

impl Predictor for ArtifactPredictor {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn description(&self) -> Option<&str> {
        self.artifact.description.as_deref()
    }

    fn schema(&self) -> &FeatureSchema {
        &self.artifact.features
    }

    fn classes(&self) -> &[ClassLabel] {
        &self.artifact.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, DomainError> {
        let expected = self.artifact.features.len();

        if features.len() != expected {
            return Err(DomainError::validation(format!(
                "expected {} features, got {}",
                expected,
                features.len()
            )));
        }

        let probabilities = predict_proba(&self.artifact.classifier, features.as_slice());

        Prediction::from_probabilities(probabilities, &self.artifact.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureDef, FeatureInput, FeatureValue};

    const ARTIFACT: &str = r#"{
        "format_version": 1,
        "name": "forest",
        "classes": [{"name": "Benign"}, {"name": "Malignant", "alert": true}],
        "features": [
            {"name": "Age", "kind": {"type": "numeric", "min": 18, "max": 100, "integer": true}, "mean": 46.2},
            {"name": "Tumor Size (cm)", "kind": {"type": "numeric", "min": 0, "max": 20}, "mean": 3.1}
        ],
        "classifier": {"type": "random_forest", "trees": [
            {"nodes": [
                {"feature": 1, "threshold": 2.5, "left": 1, "right": 2},
                {"value": [40, 2]},
                {"value": [5, 25]}
            ]},
            {"nodes": [
                {"feature": 0, "threshold": 55, "left": 1, "right": 2},
                {"value": [0.7, 0.3]},
                {"value": [0.4, 0.6]}
            ]}
        ]}
    }"#;

    fn predictor() -> ArtifactPredictor {
        ArtifactPredictor::new(ModelArtifact::from_json_str(ARTIFACT).unwrap()).unwrap()
    }

    #[test]
    fn test_predicts_label_for_valid_vector() {
        let predictor = predictor();
        let mut input = FeatureInput::new();
        input.insert("Age".to_string(), FeatureValue::Number(60.0));
        input.insert("Tumor Size (cm)".to_string(), FeatureValue::Number(8.0));

        let vector = predictor.schema().encode(&input).unwrap();
        let prediction = predictor.predict(&vector).unwrap();

        assert_eq!(prediction.label, "Malignant");
        assert_eq!(prediction.probabilities.len(), 2);
    }

    #[test]
    fn test_predictions_are_deterministic() {
        let predictor = predictor();
        let vector = predictor.schema().mean_vector();

        let first = predictor.predict(&vector).unwrap();
        for _ in 0..10 {
            assert_eq!(predictor.predict(&vector).unwrap(), first);
        }
    }

    #[test]
    fn test_mean_vector_returns_label() {
        let predictor = predictor();
        let prediction = predictor.predict(&predictor.schema().mean_vector()).unwrap();

        assert!(["Benign", "Malignant"].contains(&prediction.label.as_str()));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let predictor = predictor();
        let other = FeatureSchema::new(vec![FeatureDef::numeric("Age", 18.0, 100.0)]);

        let result = predictor.predict(&other.mean_vector());
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ArtifactPredictor::load(dir.path().join("Deployment_model.json"));

        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, ARTIFACT).unwrap();

        let predictor = ArtifactPredictor::load(&path).unwrap();
        assert_eq!(predictor.name(), "forest");
        assert_eq!(predictor.classes().len(), 2);
    }

    #[test]
    fn test_new_rejects_malformed_forest() {
        let mut artifact = ModelArtifact::from_json_str(ARTIFACT).unwrap();
        if let crate::domain::ClassifierSpec::RandomForest { trees } = &mut artifact.classifier {
            trees[0].nodes[0] = crate::domain::TreeNode::Split {
                feature: 0,
                threshold: 55.0,
                left: 0,
                right: 0,
            };
        }

        assert!(matches!(
            ArtifactPredictor::new(artifact),
            Err(LoadError::Invalid(_))
        ));
    }
}
