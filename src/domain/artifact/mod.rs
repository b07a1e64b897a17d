//! Model artifact domain - the on-disk classifier format

mod entity;
mod error;
mod validation;

pub use entity::{ClassifierSpec, ModelArtifact, TreeNode, TreeSpec, FORMAT_VERSION};
pub use error::LoadError;
pub use validation::{
    validate_artifact, validate_classes, validate_classifier, validate_schema,
    ArtifactValidationError,
};
