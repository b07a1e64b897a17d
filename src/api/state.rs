//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Assessment, DomainError, FeatureInput};
use crate::infrastructure::services::{ModelInfo, PredictionService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
}

impl AppState {
    pub fn new(prediction_service: Arc<dyn PredictionServiceTrait>) -> Self {
        Self { prediction_service }
    }
}

/// Trait for prediction service operations
#[async_trait::async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    /// Name, classes and feature schema of the loaded model
    fn model_info(&self) -> ModelInfo;
    /// A complete submission built from reference values
    fn reference_input(&self) -> FeatureInput;
    /// Verify the model answers for the reference input
    fn self_check(&self) -> Result<(), DomainError>;
    /// Validate and classify one submission
    async fn assess(&self, input: FeatureInput) -> Result<Assessment, DomainError>;
}

#[async_trait::async_trait]
impl PredictionServiceTrait for PredictionService {
    fn model_info(&self) -> ModelInfo {
        PredictionService::model_info(self)
    }

    fn reference_input(&self) -> FeatureInput {
        PredictionService::reference_input(self)
    }

    fn self_check(&self) -> Result<(), DomainError> {
        PredictionService::self_check(self)
    }

    async fn assess(&self, input: FeatureInput) -> Result<Assessment, DomainError> {
        PredictionService::assess(self, &input)
    }
}
