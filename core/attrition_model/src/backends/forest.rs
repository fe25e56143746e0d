//! Tree-ensemble classifier with random-forest probability averaging
//!
//! Each tree is a flat node array rooted at index 0. Split nodes send a row left
//! when `x[feature] <= threshold`. Children always sit at a higher index than
//! their parent, which `validate` enforces so traversal cannot loop.

use crate::artifact::ArtifactError;
use crate::backend::{ensure_columns, Classifier, ClassifierError, FeatureRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Positive-class fraction of training rows that reached this leaf
        probability: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree_index: usize, n_features: usize) -> Result<(), ArtifactError> {
        let invalid =
            |msg: String| ArtifactError::InvalidModel(format!("tree {tree_index}: {msg}"));
        if self.nodes.is_empty() {
            return Err(invalid("no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(invalid(format!(
                            "node {i} splits on feature {feature} but model has {n_features}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {i} has a non-finite threshold")));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "node {i} points to invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { probability } => {
                    if !(0.0..=1.0).contains(&probability) {
                        return Err(invalid(format!(
                            "leaf {i} probability {probability} outside [0, 1]"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf_probability(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { probability } => return probability,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub feature_names: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn new(
        feature_names: Vec<String>,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            feature_names,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.feature_names.is_empty() {
            return Err(ArtifactError::InvalidModel("forest has no features".into()));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::InvalidModel("forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.feature_names.len())?;
        }
        Ok(())
    }
}

impl Classifier for ForestModel {
    fn predict_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        ensure_columns(&self.feature_names, record)?;
        let x = record.values();
        let total: f64 = self.trees.iter().map(|t| t.leaf_probability(x)).sum();
        Ok(total / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "forest"
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["satisfaction_level".into(), "number_project".into()]
    }

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { probability: left },
                TreeNode::Leaf { probability: right },
            ],
        }
    }

    #[test]
    fn averages_tree_votes() {
        let forest = ForestModel::new(
            names(),
            vec![stump(0, 0.465, 0.9, 0.1), stump(1, 2.5, 0.7, 0.2)],
        )
        .unwrap();
        let r = FeatureRecord::new(names(), vec![0.2, 4.0]).unwrap();
        // tree 0: 0.2 <= 0.465 -> 0.9; tree 1: 4.0 > 2.5 -> 0.2
        let p = forest.predict_probability(&r).unwrap();
        assert!((p - 0.55).abs() < 1e-12);
    }

    #[test]
    fn split_threshold_goes_left_inclusive() {
        let forest = ForestModel::new(names(), vec![stump(0, 0.5, 1.0, 0.0)]).unwrap();
        let r = FeatureRecord::new(names(), vec![0.5, 0.0]).unwrap();
        assert_eq!(forest.predict_probability(&r).unwrap(), 1.0);
    }

    #[test]
    fn rejects_backward_child_and_bad_feature() {
        let looping = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { probability: 0.5 },
            ],
        };
        assert!(ForestModel::new(names(), vec![looping]).is_err());
        assert!(ForestModel::new(names(), vec![stump(5, 0.5, 0.1, 0.2)]).is_err());
        assert!(ForestModel::new(names(), vec![stump(0, 0.5, 1.2, 0.2)]).is_err());
        assert!(ForestModel::new(names(), vec![]).is_err());
    }

    #[test]
    fn nodes_deserialize_untagged() {
        let tree: DecisionTree = serde_json::from_str(
            r#"{"nodes":[{"feature":0,"threshold":0.5,"left":1,"right":2},
                         {"probability":0.8},{"probability":0.1}]}"#,
        )
        .unwrap();
        assert_eq!(tree, stump(0, 0.5, 0.8, 0.1));
    }
}
