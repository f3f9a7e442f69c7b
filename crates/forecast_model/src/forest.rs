//! Bagged-tree ensemble candidate.

use feature_builder::ModelInput;
use serde::{Deserialize, Serialize};

use crate::model::Regressor;
use crate::rng::Lcg;
use crate::tree::{DecisionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub tree: TreeParams,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            tree: TreeParams::default(),
            seed: 42,
        }
    }
}

/// Random forest regressor: trees grown on bootstrap samples,
/// predictions averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    #[must_use]
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
        }
    }
}

impl Regressor for RandomForest {
    fn name(&self) -> &'static str {
        "RandomForest"
    }

    fn fit(&mut self, x: &[ModelInput], y: &[f64]) {
        self.trees.clear();
        if x.is_empty() {
            return;
        }

        for tree_index in 0..self.params.n_trees {
            let mut rng = Lcg::new(self.params.seed.wrapping_add(tree_index as u64));
            let sample: Vec<usize> = (0..x.len()).map(|_| rng.next_below(x.len())).collect();

            let mut tree = DecisionTree::new(self.params.tree);
            tree.fit_indices(x, y, &sample);
            self.trees.push(tree);
        }
    }

    fn predict(&self, input: &ModelInput) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(input)).sum();
        total / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::mean_absolute_error;

    use super::*;

    fn small_params() -> ForestParams {
        ForestParams {
            n_trees: 10,
            tree: TreeParams::default(),
            seed: 42,
        }
    }

    fn step_data() -> (Vec<ModelInput>, Vec<f64>) {
        let x: Vec<ModelInput> = (0..48)
            .map(|i| {
                let hour = f64::from(i % 24);
                [hour, 0.0, 1.0, 100.0, 100.0, 0.0, 35.4]
            })
            .collect();
        let y: Vec<f64> = (0..48)
            .map(|i| if i % 24 < 12 { 10.0 } else { 50.0 })
            .collect();
        (x, y)
    }

    #[test]
    fn learns_a_step_function_approximately() {
        let (x, y) = step_data();
        let mut forest = RandomForest::new(small_params());
        forest.fit(&x, &y);

        let predictions: Vec<f64> = x.iter().map(|row| forest.predict(row)).collect();
        assert!(mean_absolute_error(&y, &predictions) < 5.0);
    }

    #[test]
    fn fixed_seed_makes_fitting_deterministic() {
        let (x, y) = step_data();

        let mut a = RandomForest::new(small_params());
        let mut b = RandomForest::new(small_params());
        a.fit(&x, &y);
        b.fit(&x, &y);

        assert_eq!(a, b);
    }

    #[test]
    fn unfit_forest_predicts_zero() {
        let forest = RandomForest::new(small_params());
        assert_eq!(forest.predict(&[0.0; 7]), 0.0);
    }
}
