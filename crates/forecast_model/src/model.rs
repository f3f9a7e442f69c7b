//! The candidate strategy interface and the persisted model type.

use feature_builder::ModelInput;
use serde::{Deserialize, Serialize};

use crate::boost::{BoostParams, GradientBoosting};
use crate::forest::{ForestParams, RandomForest};
use crate::ridge::RidgeRegression;

/// A training candidate. The trainer iterates candidates uniformly
/// and compares them by a single scalar metric; no per-type branches.
pub trait Regressor {
    fn name(&self) -> &'static str;

    /// Fits on a feature matrix and target vector of equal length.
    fn fit(&mut self, x: &[ModelInput], y: &[f64]);

    /// Predicts a single value. Unfit models predict 0.0.
    fn predict(&self, input: &ModelInput) -> f64;
}

/// A fitted model in persistable form. This is what the binary model
/// blob encodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegressionModel {
    Ridge(RidgeRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl RegressionModel {
    /// The fixed candidate set, unfit: a linear baseline, a bagged
    /// ensemble and a boosted ensemble.
    #[must_use]
    pub fn candidates() -> Vec<Self> {
        vec![
            Self::Ridge(RidgeRegression::new(1.0)),
            Self::RandomForest(RandomForest::new(ForestParams::default())),
            Self::GradientBoosting(GradientBoosting::new(BoostParams::default())),
        ]
    }
}

impl Regressor for RegressionModel {
    fn name(&self) -> &'static str {
        match self {
            Self::Ridge(model) => model.name(),
            Self::RandomForest(model) => model.name(),
            Self::GradientBoosting(model) => model.name(),
        }
    }

    fn fit(&mut self, x: &[ModelInput], y: &[f64]) {
        match self {
            Self::Ridge(model) => model.fit(x, y),
            Self::RandomForest(model) => model.fit(x, y),
            Self::GradientBoosting(model) => model.fit(x, y),
        }
    }

    fn predict(&self, input: &ModelInput) -> f64 {
        match self {
            Self::Ridge(model) => model.predict(input),
            Self::RandomForest(model) => model.predict(input),
            Self::GradientBoosting(model) => model.predict(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_set_covers_the_three_families() {
        let names: Vec<&str> = RegressionModel::candidates()
            .iter()
            .map(Regressor::name)
            .collect();
        assert_eq!(names, ["Ridge", "RandomForest", "GradientBoosting"]);
    }

    #[test]
    fn fitted_model_survives_binary_round_trip() {
        let x: Vec<ModelInput> = (0..30)
            .map(|i| [f64::from(i % 24), 0.0, 1.0, 100.0, 100.0, 0.0, 35.4])
            .collect();
        let y: Vec<f64> = (0..30).map(|i| f64::from(i % 24) * 2.0).collect();

        for mut model in RegressionModel::candidates() {
            model.fit(&x, &y);
            let encoded = postcard::to_allocvec(&model).unwrap();
            let decoded: RegressionModel = postcard::from_bytes(&encoded).unwrap();
            assert_eq!(decoded.predict(&x[7]), model.predict(&x[7]));
        }
    }
}
