//! Domain layer - Core business logic and entities

pub mod artifact;
pub mod error;
pub mod feature;
pub mod prediction;

pub use artifact::{ClassifierSpec, LoadError, ModelArtifact, TreeNode, TreeSpec, FORMAT_VERSION};
pub use error::DomainError;
pub use feature::{
    CategoryOption, FeatureDef, FeatureInput, FeatureKind, FeatureSchema, FeatureValidationError,
    FeatureValue, FeatureVector, InputValidationErrors,
};
pub use prediction::{Assessment, ClassLabel, ClassProbability, Prediction, Predictor};
