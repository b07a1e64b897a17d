//! Input validation errors

use std::fmt;

/// A single problem with a submitted feature value
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValidationError {
    /// No value was supplied (or the field was left blank)
    Missing { feature: String },
    /// The name is not part of the schema
    Unknown { feature: String },
    /// Text that does not parse as a number
    NotNumeric { feature: String, value: String },
    /// NaN or infinity
    NotFinite { feature: String },
    /// Fractional value for an integer feature
    NotInteger { feature: String, value: f64 },
    /// Outside the range seen in training
    OutOfRange {
        feature: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Not one of the categorical options
    UnknownOption {
        feature: String,
        value: String,
        options: Vec<String>,
    },
}

impl FeatureValidationError {
    /// Name of the feature the error refers to
    pub fn feature(&self) -> &str {
        match self {
            Self::Missing { feature }
            | Self::Unknown { feature }
            | Self::NotNumeric { feature, .. }
            | Self::NotFinite { feature }
            | Self::NotInteger { feature, .. }
            | Self::OutOfRange { feature, .. }
            | Self::UnknownOption { feature, .. } => feature,
        }
    }
}

impl fmt::Display for FeatureValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { feature } => write!(f, "missing value for '{}'", feature),
            Self::Unknown { feature } => write!(f, "unknown feature '{}'", feature),
            Self::NotNumeric { feature, value } => {
                write!(f, "'{}' must be a number, got '{}'", feature, value)
            }
            Self::NotFinite { feature } => write!(f, "'{}' must be a finite number", feature),
            Self::NotInteger { feature, value } => {
                write!(f, "'{}' must be a whole number, got {}", feature, value)
            }
            Self::OutOfRange {
                feature,
                value,
                min,
                max,
            } => write!(
                f,
                "'{}' must be between {} and {}, got {}",
                feature, min, max, value
            ),
            Self::UnknownOption {
                feature,
                value,
                options,
            } => write!(
                f,
                "'{}' must be one of [{}], got '{}'",
                feature,
                options.join(", "),
                value
            ),
        }
    }
}

impl std::error::Error for FeatureValidationError {}

/// Every problem found in one submission
#[derive(Debug, Clone, PartialEq)]
pub struct InputValidationErrors(Vec<FeatureValidationError>);

impl InputValidationErrors {
    pub fn new(errors: Vec<FeatureValidationError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[FeatureValidationError] {
        &self.0
    }

    pub fn first_feature(&self) -> Option<&str> {
        self.0.first().map(FeatureValidationError::feature)
    }
}

impl fmt::Display for InputValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for InputValidationErrors {}
