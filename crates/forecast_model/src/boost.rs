//! Boosted-tree ensemble candidate.

use feature_builder::ModelInput;
use serde::{Deserialize, Serialize};

use crate::model::Regressor;
use crate::tree::{DecisionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostParams {
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub tree: TreeParams,
}

impl Default for BoostParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            tree: TreeParams {
                max_depth: 3,
                min_samples_leaf: 2,
            },
        }
    }
}

/// Gradient boosting with squared-error loss: shallow trees fit to
/// the running residuals, shrunk by the learning rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    params: BoostParams,
    base: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoosting {
    #[must_use]
    pub fn new(params: BoostParams) -> Self {
        Self {
            params,
            base: 0.0,
            trees: Vec::new(),
        }
    }
}

impl Regressor for GradientBoosting {
    fn name(&self) -> &'static str {
        "GradientBoosting"
    }

    fn fit(&mut self, x: &[ModelInput], y: &[f64]) {
        self.trees.clear();
        if x.is_empty() {
            self.base = 0.0;
            return;
        }

        self.base = y.iter().sum::<f64>() / y.len() as f64;
        let mut predictions = vec![self.base; y.len()];

        for _ in 0..self.params.n_estimators {
            let residuals: Vec<f64> = y
                .iter()
                .zip(&predictions)
                .map(|(target, predicted)| target - predicted)
                .collect();

            let mut tree = DecisionTree::new(self.params.tree);
            tree.fit(x, &residuals);

            for (row, predicted) in x.iter().zip(&mut predictions) {
                *predicted += self.params.learning_rate * tree.predict(row);
            }
            self.trees.push(tree);
        }
    }

    fn predict(&self, input: &ModelInput) -> f64 {
        let boost: f64 = self.trees.iter().map(|tree| tree.predict(input)).sum();
        self.base + self.params.learning_rate * boost
    }
}
