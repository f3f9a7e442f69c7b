//! Forecast models for the AQI pipeline.
//!
//! A fixed candidate set of regressors (ridge baseline, bagged trees,
//! boosted trees) is trained per horizon on fully-labeled rows; the
//! lowest held-out MAE wins and is persisted as that horizon's
//! production model. The predictor is the pure read path over those
//! artifacts.

mod artifacts;
mod boost;
mod forest;
mod metrics;
mod model;
mod predictor;
mod ridge;
mod rng;
mod split;
mod training;
mod tree;

pub use artifacts::{ArtifactError, ModelArtifacts};
pub use boost::{BoostParams, GradientBoosting};
pub use forest::{ForestParams, RandomForest};
pub use metrics::{mean_absolute_error, r2_score};
pub use model::{RegressionModel, Regressor};
pub use predictor::Predictor;
pub use ridge::RidgeRegression;
pub use split::{train_test_split, SPLIT_SEED, TEST_FRACTION};
pub use training::{labeled_rows, train_horizon, HorizonTraining, MIN_TRAINING_SAMPLES};
pub use tree::{DecisionTree, TreeParams};
