//! Prediction domain - the predictor seam and its results

mod entity;
mod predictor;

pub use entity::{Assessment, ClassLabel, ClassProbability, Prediction};
pub use predictor::Predictor;

#[cfg(test)]
pub use predictor::mock;
