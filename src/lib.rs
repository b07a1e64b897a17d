//! OncoRisk
//!
//! Serves a pre-trained breast cancer risk classifier:
//! - A versioned JSON model artifact that carries its own feature schema
//! - Input validation and encoding into the training column order
//! - A JSON API, a static web form and a one-shot CLI

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;

use std::sync::Arc;

use anyhow::Context;

use api::state::AppState;
use domain::LoadError;
use infrastructure::model::ArtifactPredictor;
use infrastructure::services::PredictionService;

/// Load the artifact named by the configuration
pub fn load_predictor(config: &AppConfig) -> Result<ArtifactPredictor, LoadError> {
    ArtifactPredictor::load(&config.model.path)
}

/// Build the prediction service around the configured artifact
pub fn create_prediction_service(config: &AppConfig) -> anyhow::Result<PredictionService> {
    let predictor = load_predictor(config).with_context(|| {
        format!(
            "Failed to load model artifact from {}",
            config.model.path.display()
        )
    })?;

    Ok(PredictionService::new(Arc::new(predictor)))
}

/// Create application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_prediction_service(config)?;
    Ok(AppState::new(Arc::new(service)))
}
