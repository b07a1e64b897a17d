//! Prediction results

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// An output class of a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLabel {
    pub name: String,

    /// Whether the class warrants an urgent follow-up
    #[serde(default)]
    pub alert: bool,

    /// Guidance shown alongside the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl ClassLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alert: false,
            advice: None,
        }
    }

    pub fn with_alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }
}

/// Raw classifier output: the winning class and the full distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class_index: usize,
    pub label: String,
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Pick the most probable class; ties go to the lowest index
    pub fn from_probabilities(
        probabilities: Vec<f64>,
        classes: &[ClassLabel],
    ) -> Result<Self, DomainError> {
        if probabilities.len() != classes.len() {
            return Err(DomainError::model(format!(
                "classifier produced {} probabilities for {} classes",
                probabilities.len(),
                classes.len()
            )));
        }

        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(DomainError::model("classifier produced a non-finite probability"));
        }

        let mut class_index = 0;

        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[class_index] {
                class_index = i;
            }
        }

        let label = classes
            .get(class_index)
            .map(|c| c.name.clone())
            .ok_or_else(|| DomainError::model("classifier has no classes"))?;

        Ok(Self {
            class_index,
            label,
            probabilities,
        })
    }

    /// Probability of the predicted class
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .get(self.class_index)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// A prediction dressed up for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub model: String,
    pub label: String,
    pub class_index: usize,
    pub confidence: f64,
    pub alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    pub probabilities: Vec<ClassProbability>,
}

impl Assessment {
    pub fn new(model: impl Into<String>, prediction: Prediction, classes: &[ClassLabel]) -> Self {
        let class = classes.get(prediction.class_index);
        let probabilities = classes
            .iter()
            .zip(prediction.probabilities.iter())
            .map(|(c, p)| ClassProbability {
                label: c.name.clone(),
                probability: *p,
            })
            .collect();

        Self {
            model: model.into(),
            confidence: prediction.confidence(),
            alert: class.map(|c| c.alert).unwrap_or(false),
            advice: class.and_then(|c| c.advice.clone()),
            label: prediction.label,
            class_index: prediction.class_index,
            probabilities,
        }
    }
}
