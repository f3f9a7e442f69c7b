//! Ridge regression, the linear baseline candidate.

use feature_builder::{ModelInput, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

use crate::model::Regressor;

/// Linear model fit by solving the regularized normal equations.
///
/// The intercept is carried as an extra weight and left out of the
/// penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeRegression {
    alpha: f64,
    /// `FEATURE_COUNT` feature weights followed by the intercept.
    /// Empty until fit.
    weights: Vec<f64>,
}

impl RidgeRegression {
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            weights: Vec::new(),
        }
    }
}

impl Regressor for RidgeRegression {
    fn name(&self) -> &'static str {
        "Ridge"
    }

    fn fit(&mut self, x: &[ModelInput], y: &[f64]) {
        // Augmented design: features plus a constant 1.0 column.
        const D: usize = FEATURE_COUNT + 1;

        let mut gram = [[0.0f64; D]; D];
        let mut rhs = [0.0f64; D];

        for (row, &target) in x.iter().zip(y) {
            let mut augmented = [1.0f64; D];
            augmented[..FEATURE_COUNT].copy_from_slice(row);

            for i in 0..D {
                for j in 0..D {
                    gram[i][j] += augmented[i] * augmented[j];
                }
                rhs[i] += augmented[i] * target;
            }
        }

        for i in 0..FEATURE_COUNT {
            gram[i][i] += self.alpha;
        }

        if let Some(solution) = solve(&mut gram, &mut rhs) {
            self.weights = solution;
        }
    }

    fn predict(&self, input: &ModelInput) -> f64 {
        if self.weights.len() != FEATURE_COUNT + 1 {
            return 0.0;
        }
        let dot: f64 = input
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| value * weight)
            .sum();
        dot + self.weights[FEATURE_COUNT]
    }
}

/// Solves the dense symmetric system in place with partial pivoting.
/// Returns `None` when the system is singular.
fn solve<const D: usize>(a: &mut [[f64; D]; D], b: &mut [f64; D]) -> Option<Vec<f64>> {
    for col in 0..D {
        let pivot = (col..D)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..D {
            let factor = a[row][col] / a[col][col];
            for k in col..D {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; D];
    for col in (0..D).rev() {
        let mut value = b[col];
        for k in (col + 1)..D {
            value -= a[col][k] * solution[k];
        }
        solution[col] = value / a[col][col];
    }
    Some(solution)
}
