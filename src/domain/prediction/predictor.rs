use std::fmt::Debug;

use super::{ClassLabel, Prediction};
use crate::domain::feature::{FeatureSchema, FeatureVector};
use crate::domain::DomainError;

/// A loaded classifier.
///
/// Implementations are immutable after construction and shared across
/// requests behind an `Arc`.
pub trait Predictor: Send + Sync + Debug {
    /// Model name
    fn name(&self) -> &str;

    /// Optional model description
    fn description(&self) -> Option<&str>;

    /// Features the model was trained on, in training order
    fn schema(&self) -> &FeatureSchema;

    /// Output classes, indexed by class index
    fn classes(&self) -> &[ClassLabel];

    /// Classify one encoded feature vector
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Predictor returning a fixed distribution and counting calls
    #[derive(Debug)]
    pub struct StubPredictor {
        schema: FeatureSchema,
        classes: Vec<ClassLabel>,
        probabilities: Vec<f64>,
        calls: AtomicUsize,
    }

    impl StubPredictor {
        pub fn new(schema: FeatureSchema, classes: Vec<ClassLabel>) -> Self {
            let mut probabilities = vec![0.0; classes.len()];

            if let Some(first) = probabilities.first_mut() {
                *first = 1.0;
            }

            Self {
                schema,
                classes,
                probabilities,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_probabilities(mut self, probabilities: Vec<f64>) -> Self {
            self.probabilities = probabilities;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Predictor for StubPredictor {
        fn name(&self) -> &str {
            "stub"
        }

        fn description(&self) -> Option<&str> {
            None
        }

        fn schema(&self) -> &FeatureSchema {
            &self.schema
        }

        fn classes(&self) -> &[ClassLabel] {
            &self.classes
        }

        fn predict(&self, features: &FeatureVector) -> Result<Prediction, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if features.len() != self.schema.len() {
                return Err(DomainError::validation("feature count mismatch"));
            }

            Prediction::from_probabilities(self.probabilities.clone(), &self.classes)
        }
    }
}
