//! Serialized model artifact

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::LoadError;
use super::validation::validate_artifact;
use crate::domain::feature::FeatureSchema;
use crate::domain::prediction::ClassLabel;

/// Artifact format version this build reads
pub const FORMAT_VERSION: u32 = 1;

/// A pre-trained classifier together with the schema it was trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub classes: Vec<ClassLabel>,
    pub features: FeatureSchema,
    pub classifier: ClassifierSpec,
}

/// Classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierSpec {
    /// One coefficient row for binary models, one row per class otherwise
    LogisticRegression {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    DecisionTree(TreeSpec),
    RandomForest { trees: Vec<TreeSpec> },
}

impl ClassifierSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::DecisionTree(_) => "decision_tree",
            Self::RandomForest { .. } => "random_forest",
        }
    }
}

/// A flattened binary tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights (sample counts or probabilities)
    Leaf { value: Vec<f64> },
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

impl ModelArtifact {
    /// Read, parse and validate an artifact file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;

        Self::parse(path, &contents)
    }

    /// Parse and validate an artifact held in memory
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Self::parse(Path::new("<memory>"), json)
    }

    fn parse(path: &Path, json: &str) -> Result<Self, LoadError> {
        // Check the version before the full shape so newer formats report
        // the version rather than a field error.
        let probe: VersionProbe = serde_json::from_str(json).map_err(|e| LoadError::Corrupt {
            path: PathBuf::from(path),
            source: e,
        })?;

        if probe.format_version != FORMAT_VERSION {
            return Err(LoadError::UnsupportedVersion {
                found: probe.format_version,
                supported: FORMAT_VERSION,
            });
        }

        let artifact: Self = serde_json::from_str(json).map_err(|e| LoadError::Corrupt {
            path: PathBuf::from(path),
            source: e,
        })?;

        validate_artifact(&artifact)?;

        Ok(artifact)
    }
}
