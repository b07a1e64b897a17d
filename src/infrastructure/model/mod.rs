//! Model infrastructure - artifact loading and classifier evaluation

mod classifier;
mod predictor;

pub use classifier::predict_proba;
pub use predictor::ArtifactPredictor;
