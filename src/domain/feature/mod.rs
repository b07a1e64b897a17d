//! Feature domain - the ordered inputs a classifier was trained on

mod input;
mod schema;
mod validation;

pub use input::{FeatureInput, FeatureValue, FeatureVector};
pub use schema::{CategoryOption, FeatureDef, FeatureKind, FeatureSchema};
pub use validation::{FeatureValidationError, InputValidationErrors};
