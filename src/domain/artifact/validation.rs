//! Structural checks run on every artifact before it is used

use std::collections::HashSet;
use std::fmt;

use super::entity::{ClassifierSpec, ModelArtifact, TreeNode, TreeSpec};
use crate::domain::feature::{FeatureDef, FeatureKind, FeatureSchema};
use crate::domain::prediction::ClassLabel;

/// Artifact validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactValidationError {
    /// Model name is empty
    EmptyName,
    /// Fewer than two output classes
    TooFewClasses { count: usize },
    /// Class name empty or repeated
    InvalidClassName { name: String },
    /// Schema has no features
    NoFeatures,
    /// Feature name empty or repeated
    InvalidFeatureName { name: String },
    /// Numeric bounds are not finite or min > max
    InvalidBounds { feature: String, min: f64, max: f64 },
    /// Categorical feature without options
    NoOptions { feature: String },
    /// Option label or code repeated
    DuplicateOption { feature: String, option: String },
    /// Default is outside the bounds or not an option code
    InvalidDefault { feature: String, value: f64 },
    /// Coefficient row does not have one weight per feature
    CoefficientLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Intercept count differs from the number of coefficient rows
    InterceptCount { expected: usize, found: usize },
    /// Coefficient rows do not fit the class count
    LogisticShape { rows: usize, classes: usize },
    /// NaN or infinite parameter
    NonFiniteParameter { context: String },
    /// Tree without nodes
    EmptyTree { tree: usize },
    /// Split on a feature index past the schema
    SplitFeature {
        tree: usize,
        node: usize,
        feature: usize,
    },
    /// Child index out of range or not after its parent
    ChildIndex {
        tree: usize,
        node: usize,
        child: usize,
    },
    /// Leaf does not have one weight per class
    LeafLength {
        tree: usize,
        node: usize,
        expected: usize,
        found: usize,
    },
    /// Negative leaf weight or all weights zero
    LeafWeights { tree: usize, node: usize },
    /// Random forest without trees
    EmptyForest,
}

impl fmt::Display for ArtifactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "model name cannot be empty"),
            Self::TooFewClasses { count } => {
                write!(f, "a classifier needs at least 2 classes, found {}", count)
            }
            Self::InvalidClassName { name } => {
                write!(f, "class name '{}' is empty or repeated", name)
            }
            Self::NoFeatures => write!(f, "feature schema is empty"),
            Self::InvalidFeatureName { name } => {
                write!(f, "feature name '{}' is empty or repeated", name)
            }
            Self::InvalidBounds { feature, min, max } => {
                write!(f, "feature '{}' has invalid bounds [{}, {}]", feature, min, max)
            }
            Self::NoOptions { feature } => {
                write!(f, "categorical feature '{}' has no options", feature)
            }
            Self::DuplicateOption { feature, option } => {
                write!(f, "feature '{}' repeats option '{}'", feature, option)
            }
            Self::InvalidDefault { feature, value } => {
                write!(f, "feature '{}' has invalid default {}", feature, value)
            }
            Self::CoefficientLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "coefficient row {} has {} weights, expected {}",
                row, found, expected
            ),
            Self::InterceptCount { expected, found } => {
                write!(f, "expected {} intercepts, found {}", expected, found)
            }
            Self::LogisticShape { rows, classes } => write!(
                f,
                "{} coefficient rows do not fit {} classes (use 1 row for 2 classes, one per class otherwise)",
                rows, classes
            ),
            Self::NonFiniteParameter { context } => {
                write!(f, "non-finite parameter in {}", context)
            }
            Self::EmptyTree { tree } => write!(f, "tree {} has no nodes", tree),
            Self::SplitFeature {
                tree,
                node,
                feature,
            } => write!(
                f,
                "tree {} node {} splits on unknown feature index {}",
                tree, node, feature
            ),
            Self::ChildIndex { tree, node, child } => write!(
                f,
                "tree {} node {} has invalid child index {}",
                tree, node, child
            ),
            Self::LeafLength {
                tree,
                node,
                expected,
                found,
            } => write!(
                f,
                "tree {} leaf {} has {} class weights, expected {}",
                tree, node, found, expected
            ),
            Self::LeafWeights { tree, node } => write!(
                f,
                "tree {} leaf {} has negative or all-zero weights",
                tree, node
            ),
            Self::EmptyForest => write!(f, "random forest has no trees"),
        }
    }
}

impl std::error::Error for ArtifactValidationError {}

/// Validate a complete artifact
pub fn validate_artifact(artifact: &ModelArtifact) -> Result<(), ArtifactValidationError> {
    if artifact.name.trim().is_empty() {
        return Err(ArtifactValidationError::EmptyName);
    }

    validate_classes(&artifact.classes)?;
    validate_schema(&artifact.features)?;
    validate_classifier(
        &artifact.classifier,
        artifact.features.len(),
        artifact.classes.len(),
    )
}

/// Validate output classes
pub fn validate_classes(classes: &[ClassLabel]) -> Result<(), ArtifactValidationError> {
    if classes.len() < 2 {
        return Err(ArtifactValidationError::TooFewClasses {
            count: classes.len(),
        });
    }

    let mut seen = HashSet::new();

    for class in classes {
        if class.name.trim().is_empty() || !seen.insert(class.name.as_str()) {
            return Err(ArtifactValidationError::InvalidClassName {
                name: class.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate a feature schema
pub fn validate_schema(schema: &FeatureSchema) -> Result<(), ArtifactValidationError> {
    if schema.is_empty() {
        return Err(ArtifactValidationError::NoFeatures);
    }

    let mut seen = HashSet::new();

    for feature in schema.features() {
        if feature.name.trim().is_empty() || !seen.insert(feature.name.as_str()) {
            return Err(ArtifactValidationError::InvalidFeatureName {
                name: feature.name.clone(),
            });
        }

        validate_feature(feature)?;
    }

    Ok(())
}

fn validate_feature(feature: &FeatureDef) -> Result<(), ArtifactValidationError> {
    if let Some(mean) = feature.mean {
        if !mean.is_finite() {
            return Err(ArtifactValidationError::NonFiniteParameter {
                context: format!("mean of '{}'", feature.name),
            });
        }
    }

    match &feature.kind {
        FeatureKind::Numeric { min, max, .. } => {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ArtifactValidationError::InvalidBounds {
                    feature: feature.name.clone(),
                    min: *min,
                    max: *max,
                });
            }

            if let Some(default) = feature.default {
                if !(*min..=*max).contains(&default) {
                    return Err(ArtifactValidationError::InvalidDefault {
                        feature: feature.name.clone(),
                        value: default,
                    });
                }
            }
        }
        FeatureKind::Categorical { options } => {
            if options.is_empty() {
                return Err(ArtifactValidationError::NoOptions {
                    feature: feature.name.clone(),
                });
            }

            let mut labels = HashSet::new();
            let mut codes: Vec<f64> = Vec::with_capacity(options.len());

            for option in options {
                if !option.code.is_finite() {
                    return Err(ArtifactValidationError::NonFiniteParameter {
                        context: format!("option '{}' of '{}'", option.label, feature.name),
                    });
                }

                if !labels.insert(option.label.as_str()) || codes.contains(&option.code) {
                    return Err(ArtifactValidationError::DuplicateOption {
                        feature: feature.name.clone(),
                        option: option.label.clone(),
                    });
                }

                codes.push(option.code);
            }

            if let Some(default) = feature.default {
                if !codes.contains(&default) {
                    return Err(ArtifactValidationError::InvalidDefault {
                        feature: feature.name.clone(),
                        value: default,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validate classifier dimensions against the schema and class count
pub fn validate_classifier(
    classifier: &ClassifierSpec,
    features: usize,
    classes: usize,
) -> Result<(), ArtifactValidationError> {
    match classifier {
        ClassifierSpec::LogisticRegression {
            coefficients,
            intercepts,
        } => validate_logistic(coefficients, intercepts, features, classes),
        ClassifierSpec::DecisionTree(tree) => validate_tree(0, tree, features, classes),
        ClassifierSpec::RandomForest { trees } => {
            if trees.is_empty() {
                return Err(ArtifactValidationError::EmptyForest);
            }

            for (i, tree) in trees.iter().enumerate() {
                validate_tree(i, tree, features, classes)?;
            }

            Ok(())
        }
    }
}

fn validate_logistic(
    coefficients: &[Vec<f64>],
    intercepts: &[f64],
    features: usize,
    classes: usize,
) -> Result<(), ArtifactValidationError> {
    let rows = coefficients.len();
    let fits = (rows == 1 && classes == 2) || (rows > 1 && rows == classes);

    if !fits {
        return Err(ArtifactValidationError::LogisticShape { rows, classes });
    }

    if intercepts.len() != rows {
        return Err(ArtifactValidationError::InterceptCount {
            expected: rows,
            found: intercepts.len(),
        });
    }

    for (row, weights) in coefficients.iter().enumerate() {
        if weights.len() != features {
            return Err(ArtifactValidationError::CoefficientLength {
                row,
                expected: features,
                found: weights.len(),
            });
        }

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactValidationError::NonFiniteParameter {
                context: format!("coefficient row {}", row),
            });
        }
    }

    if intercepts.iter().any(|b| !b.is_finite()) {
        return Err(ArtifactValidationError::NonFiniteParameter {
            context: "intercepts".to_string(),
        });
    }

    Ok(())
}

fn validate_tree(
    index: usize,
    tree: &TreeSpec,
    features: usize,
    classes: usize,
) -> Result<(), ArtifactValidationError> {
    if tree.nodes.is_empty() {
        return Err(ArtifactValidationError::EmptyTree { tree: index });
    }

    for (node, spec) in tree.nodes.iter().enumerate() {
        match spec {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= features {
                    return Err(ArtifactValidationError::SplitFeature {
                        tree: index,
                        node,
                        feature: *feature,
                    });
                }

                if !threshold.is_finite() {
                    return Err(ArtifactValidationError::NonFiniteParameter {
                        context: format!("tree {} node {} threshold", index, node),
                    });
                }

                // Children strictly after their parent keeps traversal acyclic
                for child in [*left, *right] {
                    if child <= node || child >= tree.nodes.len() {
                        return Err(ArtifactValidationError::ChildIndex {
                            tree: index,
                            node,
                            child,
                        });
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value.len() != classes {
                    return Err(ArtifactValidationError::LeafLength {
                        tree: index,
                        node,
                        expected: classes,
                        found: value.len(),
                    });
                }

                let valid = value.iter().all(|w| w.is_finite() && *w >= 0.0);

                if !valid || value.iter().sum::<f64>() <= 0.0 {
                    return Err(ArtifactValidationError::LeafWeights { tree: index, node });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<ClassLabel> {
        vec![ClassLabel::new("Benign"), ClassLabel::new("Malignant")]
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            FeatureDef::numeric("Age", 18.0, 100.0),
            FeatureDef::categorical("History", &[("No", 0.0), ("None", 1.0), ("Yes", 2.0)]),
        ])
    }

    fn stump(left: Vec<f64>, right: Vec<f64>) -> TreeSpec {
        TreeSpec {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 50.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    #[test]
    fn test_valid_classes_and_schema() {
        assert!(validate_classes(&classes()).is_ok());
        assert!(validate_schema(&schema()).is_ok());
    }

    #[test]
    fn test_invalid_classes() {
        assert!(matches!(
            validate_classes(&[ClassLabel::new("Benign")]),
            Err(ArtifactValidationError::TooFewClasses { count: 1 })
        ));
        assert!(matches!(
            validate_classes(&[ClassLabel::new("A"), ClassLabel::new("A")]),
            Err(ArtifactValidationError::InvalidClassName { .. })
        ));
    }

    #[test]
    fn test_invalid_schema() {
        assert!(matches!(
            validate_schema(&FeatureSchema::default()),
            Err(ArtifactValidationError::NoFeatures)
        ));

        let duplicate = FeatureSchema::new(vec![
            FeatureDef::numeric("Age", 18.0, 100.0),
            FeatureDef::numeric("Age", 18.0, 100.0),
        ]);
        assert!(matches!(
            validate_schema(&duplicate),
            Err(ArtifactValidationError::InvalidFeatureName { .. })
        ));

        let bounds = FeatureSchema::new(vec![FeatureDef::numeric("Age", 100.0, 18.0)]);
        assert!(matches!(
            validate_schema(&bounds),
            Err(ArtifactValidationError::InvalidBounds { .. })
        ));

        let default = FeatureSchema::new(vec![
            FeatureDef::numeric("Age", 18.0, 100.0).with_default(10.0)
        ]);
        assert!(matches!(
            validate_schema(&default),
            Err(ArtifactValidationError::InvalidDefault { .. })
        ));

        let options = FeatureSchema::new(vec![FeatureDef::categorical(
            "Breast",
            &[("Left", 0.0), ("Right", 0.0)],
        )]);
        assert!(matches!(
            validate_schema(&options),
            Err(ArtifactValidationError::DuplicateOption { .. })
        ));

        let empty = FeatureSchema::new(vec![FeatureDef::categorical("Breast", &[])]);
        assert!(matches!(
            validate_schema(&empty),
            Err(ArtifactValidationError::NoOptions { .. })
        ));
    }

    #[test]
    fn test_logistic_shapes() {
        let binary = ClassifierSpec::LogisticRegression {
            coefficients: vec![vec![0.1, 0.2]],
            intercepts: vec![-1.0],
        };
        assert!(validate_classifier(&binary, 2, 2).is_ok());
        assert!(matches!(
            validate_classifier(&binary, 2, 3),
            Err(ArtifactValidationError::LogisticShape { rows: 1, classes: 3 })
        ));
        assert!(matches!(
            validate_classifier(&binary, 3, 2),
            Err(ArtifactValidationError::CoefficientLength { .. })
        ));

        let multinomial = ClassifierSpec::LogisticRegression {
            coefficients: vec![vec![0.1], vec![0.2], vec![0.3]],
            intercepts: vec![0.0, 0.0],
        };
        assert!(matches!(
            validate_classifier(&multinomial, 1, 3),
            Err(ArtifactValidationError::InterceptCount { expected: 3, found: 2 })
        ));

        let nan = ClassifierSpec::LogisticRegression {
            coefficients: vec![vec![f64::NAN]],
            intercepts: vec![0.0],
        };
        assert!(matches!(
            validate_classifier(&nan, 1, 2),
            Err(ArtifactValidationError::NonFiniteParameter { .. })
        ));
    }

    #[test]
    fn test_tree_checks() {
        let tree = ClassifierSpec::DecisionTree(stump(vec![3.0, 1.0], vec![0.0, 4.0]));
        assert!(validate_classifier(&tree, 2, 2).is_ok());
        assert!(matches!(
            validate_classifier(&tree, 2, 3),
            Err(ArtifactValidationError::LeafLength { .. })
        ));

        let zero = ClassifierSpec::DecisionTree(stump(vec![0.0, 0.0], vec![1.0, 1.0]));
        assert!(matches!(
            validate_classifier(&zero, 2, 2),
            Err(ArtifactValidationError::LeafWeights { node: 1, .. })
        ));

        let cycle = ClassifierSpec::DecisionTree(TreeSpec {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf {
                    value: vec![1.0, 0.0],
                },
            ],
        });
        assert!(matches!(
            validate_classifier(&cycle, 1, 2),
            Err(ArtifactValidationError::ChildIndex { child: 0, .. })
        ));

        let out_of_range = ClassifierSpec::DecisionTree(TreeSpec {
            nodes: vec![TreeNode::Split {
                feature: 5,
                threshold: 1.0,
                left: 1,
                right: 2,
            }],
        });
        assert!(matches!(
            validate_classifier(&out_of_range, 2, 2),
            Err(ArtifactValidationError::SplitFeature { feature: 5, .. })
        ));
    }

    #[test]
    fn test_forest_checks() {
        let empty = ClassifierSpec::RandomForest { trees: vec![] };
        assert!(matches!(
            validate_classifier(&empty, 2, 2),
            Err(ArtifactValidationError::EmptyForest)
        ));

        let forest = ClassifierSpec::RandomForest {
            trees: vec![
                stump(vec![1.0, 0.0], vec![0.0, 1.0]),
                TreeSpec { nodes: vec![] },
            ],
        };
        assert!(matches!(
            validate_classifier(&forest, 2, 2),
            Err(ArtifactValidationError::EmptyTree { tree: 1 })
        ));
    }
}
