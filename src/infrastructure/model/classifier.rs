//! Class probability evaluation for each supported classifier

use crate::domain::{ClassifierSpec, TreeNode, TreeSpec};

/// Class probabilities for one feature vector.
///
/// Assumes the classifier passed artifact validation and `x` has one value per
/// feature; malformed trees yield an empty distribution rather than a panic.
pub fn predict_proba(classifier: &ClassifierSpec, x: &[f64]) -> Vec<f64> {
    match classifier {
        ClassifierSpec::LogisticRegression {
            coefficients,
            intercepts,
        } => logistic(coefficients, intercepts, x),
        ClassifierSpec::DecisionTree(tree) => tree_proba(tree, x),
        ClassifierSpec::RandomForest { trees } => forest_proba(trees, x),
    }
}

fn logistic(coefficients: &[Vec<f64>], intercepts: &[f64], x: &[f64]) -> Vec<f64> {
    let scores: Vec<f64> = coefficients
        .iter()
        .zip(intercepts.iter())
        .map(|(weights, bias)| dot(weights, x) + bias)
        .collect();

    match scores.as_slice() {
        [score] => {
            let p = sigmoid(*score);
            vec![1.0 - p, p]
        }
        _ => softmax(&scores),
    }
}

fn tree_proba(tree: &TreeSpec, x: &[f64]) -> Vec<f64> {
    let mut index = 0;

    loop {
        match tree.nodes.get(index) {
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let value = x.get(*feature).copied().unwrap_or(f64::NAN);
                let next = if value <= *threshold { *left } else { *right };

                // Children always follow their parent; anything else is a cycle
                if next <= index {
                    return Vec::new();
                }
                index = next;
            }
            Some(TreeNode::Leaf { value }) => return normalize(value),
            None => return Vec::new(),
        }
    }
}

fn forest_proba(trees: &[TreeSpec], x: &[f64]) -> Vec<f64> {
    let mut total: Option<Vec<f64>> = None;

    for tree in trees {
        let proba = tree_proba(tree, x);

        // One bad tree spoils the whole vote
        if proba.is_empty() {
            return Vec::new();
        }

        let Some(sum) = total.as_mut() else {
            total = Some(proba);
            continue;
        };

        if sum.len() != proba.len() {
            return Vec::new();
        }

        for (t, p) in sum.iter_mut().zip(proba) {
            *t += p;
        }
    }

    let count = trees.len() as f64;
    total
        .map(|sum| sum.iter().map(|t| t / count).collect())
        .unwrap_or_default()
}

fn dot(weights: &[f64], x: &[f64]) -> f64 {
    weights.iter().zip(x.iter()).map(|(w, v)| w * v).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();

    exps.iter().map(|e| e / sum).collect()
}

fn normalize(weights: &[f64]) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| w / sum).collect()
}
