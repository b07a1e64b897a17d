//! Feature schema - ordered feature definitions and input encoding

use serde::{Deserialize, Serialize};

use super::{
    FeatureInput, FeatureValidationError, FeatureValue, FeatureVector, InputValidationErrors,
};

/// One choice of a categorical feature and the code the model was trained with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    pub code: f64,
}

/// How a feature's value is entered and encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    Numeric {
        min: f64,
        max: f64,
        #[serde(default)]
        integer: bool,
    },
    Categorical {
        options: Vec<CategoryOption>,
    },
}

/// A single model input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDef {
    /// Column name used during training
    pub name: String,

    /// Human readable label for forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub kind: FeatureKind,

    /// Initial form value (an option code for categorical features)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,

    /// Mean of the feature over the training set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

impl FeatureDef {
    pub fn numeric(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind: FeatureKind::Numeric {
                min,
                max,
                integer: false,
            },
            default: None,
            mean: None,
        }
    }

    pub fn categorical(name: impl Into<String>, options: &[(&str, f64)]) -> Self {
        let options = options
            .iter()
            .map(|(label, code)| CategoryOption {
                label: (*label).to_string(),
                code: *code,
            })
            .collect();

        Self {
            name: name.into(),
            label: None,
            kind: FeatureKind::Categorical { options },
            default: None,
            mean: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    /// Restrict a numeric feature to whole numbers
    pub fn integer(mut self) -> Self {
        if let FeatureKind::Numeric { integer, .. } = &mut self.kind {
            *integer = true;
        }
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Labels of a categorical feature, empty for numeric ones
    pub fn option_labels(&self) -> Vec<String> {
        match &self.kind {
            FeatureKind::Categorical { options } => {
                options.iter().map(|o| o.label.clone()).collect()
            }
            FeatureKind::Numeric { .. } => Vec::new(),
        }
    }

    /// Convert a submitted value into the number the model expects
    pub fn encode_value(&self, value: &FeatureValue) -> Result<f64, FeatureValidationError> {
        match &self.kind {
            FeatureKind::Numeric { min, max, integer } => {
                let number = self.parse_number(value)?;

                if !number.is_finite() {
                    return Err(FeatureValidationError::NotFinite {
                        feature: self.name.clone(),
                    });
                }

                if *integer && number.fract() != 0.0 {
                    return Err(FeatureValidationError::NotInteger {
                        feature: self.name.clone(),
                        value: number,
                    });
                }

                if number < *min || number > *max {
                    return Err(FeatureValidationError::OutOfRange {
                        feature: self.name.clone(),
                        value: number,
                        min: *min,
                        max: *max,
                    });
                }

                Ok(number)
            }
            FeatureKind::Categorical { options } => self.encode_option(options, value),
        }
    }

    fn parse_number(&self, value: &FeatureValue) -> Result<f64, FeatureValidationError> {
        match value {
            FeatureValue::Number(n) => Ok(*n),
            FeatureValue::Text(text) => {
                let trimmed = text.trim();

                if trimmed.is_empty() {
                    return Err(FeatureValidationError::Missing {
                        feature: self.name.clone(),
                    });
                }

                trimmed
                    .parse::<f64>()
                    .map_err(|_| FeatureValidationError::NotNumeric {
                        feature: self.name.clone(),
                        value: text.clone(),
                    })
            }
        }
    }

    fn encode_option(
        &self,
        options: &[CategoryOption],
        value: &FeatureValue,
    ) -> Result<f64, FeatureValidationError> {
        let matched = match value {
            FeatureValue::Number(n) => options.iter().find(|o| o.code == *n),
            FeatureValue::Text(text) => {
                let trimmed = text.trim();

                if trimmed.is_empty() {
                    return Err(FeatureValidationError::Missing {
                        feature: self.name.clone(),
                    });
                }

                // Labels win over codes: "1" is a label for Inv-Nodes
                options
                    .iter()
                    .find(|o| o.label == trimmed)
                    .or_else(|| {
                        options
                            .iter()
                            .find(|o| o.label.eq_ignore_ascii_case(trimmed))
                    })
                    .or_else(|| {
                        trimmed
                            .parse::<f64>()
                            .ok()
                            .and_then(|code| options.iter().find(|o| o.code == code))
                    })
            }
        };

        matched
            .map(|o| o.code)
            .ok_or_else(|| FeatureValidationError::UnknownOption {
                feature: self.name.clone(),
                value: value.to_string(),
                options: self.option_labels(),
            })
    }

    /// Value a form starts from: the configured default, else the training
    /// mean snapped to a valid value, else the middle of the range or the
    /// first option.
    pub fn reference_value(&self) -> FeatureValue {
        match &self.kind {
            FeatureKind::Numeric { min, max, integer } => {
                let mut value = self.default.or(self.mean).unwrap_or((min + max) / 2.0);

                if *integer {
                    value = value.round();
                }

                FeatureValue::Number(value.max(*min).min(*max))
            }
            FeatureKind::Categorical { options } => {
                let option = match self.default.or(self.mean) {
                    Some(target) => options.iter().min_by(|a, b| {
                        (a.code - target).abs().total_cmp(&(b.code - target).abs())
                    }),
                    None => options.first(),
                };

                option
                    .map(|o| FeatureValue::Text(o.label.clone()))
                    .unwrap_or(FeatureValue::Number(0.0))
            }
        }
    }

    fn mean_or_reference(&self) -> f64 {
        self.mean
            .unwrap_or_else(|| self.encode_value(&self.reference_value()).unwrap_or_default())
    }
}

/// Ordered feature definitions; the order is the column order of training
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema(Vec<FeatureDef>);

impl FeatureSchema {
    pub fn new(features: Vec<FeatureDef>) -> Self {
        Self(features)
    }

    pub fn features(&self) -> &[FeatureDef] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FeatureDef> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }

    /// Validate a submission and encode it in schema order.
    ///
    /// Every missing, unknown or malformed value is reported, not just the
    /// first one.
    pub fn encode(&self, input: &FeatureInput) -> Result<FeatureVector, InputValidationErrors> {
        let mut errors = Vec::new();

        for name in input.keys() {
            if self.get(name).is_none() {
                errors.push(FeatureValidationError::Unknown {
                    feature: name.clone(),
                });
            }
        }

        let mut values = Vec::with_capacity(self.len());

        for feature in &self.0 {
            match input.get(&feature.name) {
                Some(value) => match feature.encode_value(value) {
                    Ok(encoded) => values.push(encoded),
                    Err(e) => errors.push(e),
                },
                None => errors.push(FeatureValidationError::Missing {
                    feature: feature.name.clone(),
                }),
            }
        }

        if errors.is_empty() {
            Ok(FeatureVector::new(values))
        } else {
            Err(InputValidationErrors::new(errors))
        }
    }

    /// A complete, valid submission built from each feature's reference value
    pub fn reference_input(&self) -> FeatureInput {
        self.0
            .iter()
            .map(|f| (f.name.clone(), f.reference_value()))
            .collect()
    }

    /// Every feature at its training-set mean (reference value when no mean
    /// is recorded). Means of categorical codes need not be a valid option,
    /// so this bypasses input validation.
    pub fn mean_vector(&self) -> FeatureVector {
        FeatureVector::new(self.0.iter().map(FeatureDef::mean_or_reference).collect())
    }
}
