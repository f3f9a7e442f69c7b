//! Regression trees, the building block of both ensemble candidates.

use core::cmp::Ordering;

use feature_builder::{ModelInput, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_leaf: 2,
        }
    }
}

/// A CART-style regression tree split on variance reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    params: TreeParams,
    root: Option<Node>,
}

impl DecisionTree {
    #[must_use]
    pub fn new(params: TreeParams) -> Self {
        Self { params, root: None }
    }

    /// Fits on the full sample set.
    pub fn fit(&mut self, x: &[ModelInput], y: &[f64]) {
        let indices: Vec<usize> = (0..x.len()).collect();
        self.fit_indices(x, y, &indices);
    }

    /// Fits on a subset of samples, referenced by index. Used by the
    /// forest to train on bootstrap samples without copying rows.
    pub(crate) fn fit_indices(&mut self, x: &[ModelInput], y: &[f64], indices: &[usize]) {
        if indices.is_empty() {
            self.root = None;
            return;
        }
        self.root = Some(grow(x, y, indices, 0, self.params));
    }

    #[must_use]
    pub fn predict(&self, input: &ModelInput) -> f64 {
        let Some(mut node) = self.root.as_ref() else {
            return 0.0;
        };
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if input[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn grow(x: &[ModelInput], y: &[f64], indices: &[usize], depth: usize, params: TreeParams) -> Node {
    if depth >= params.max_depth || indices.len() < 2 * params.min_samples_leaf {
        return Node::Leaf {
            value: mean_of(y, indices),
        };
    }

    let Some((feature, threshold)) = best_split(x, y, indices, params.min_samples_leaf) else {
        return Node::Leaf {
            value: mean_of(y, indices),
        };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| x[i][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(x, y, &left, depth + 1, params)),
        right: Box::new(grow(x, y, &right, depth + 1, params)),
    }
}

/// Finds the split minimizing the summed squared error of the two
/// sides. `None` when no valid split exists (constant features or the
/// leaf-size constraint).
fn best_split(
    x: &[ModelInput],
    y: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<(usize, f64)> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| y[i] * y[i]).sum();

    let mut best: Option<(f64, usize, f64)> = None;

    for feature in 0..FEATURE_COUNT {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| {
            x[a][feature]
                .partial_cmp(&x[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for (position, window) in order.windows(2).enumerate() {
            let value = y[window[0]];
            left_sum += value;
            left_sq += value * value;

            // No threshold separates equal feature values.
            if x[window[0]][feature] == x[window[1]][feature] {
                continue;
            }

            let left_n = position + 1;
            let right_n = n - left_n;
            if left_n < min_samples_leaf || right_n < min_samples_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n as f64)
                + (right_sq - right_sum * right_sum / right_n as f64);

            if best.map_or(true, |(best_sse, _, _)| sse < best_sse) {
                let threshold = (x[window[0]][feature] + x[window[1]][feature]) / 2.0;
                best = Some((sse, feature, threshold));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}

fn mean_of(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}
