//! Per-horizon candidate training and selection.

use aqi_structs::{Horizon, ModelInfo, ObservationRow};
use chrono::Utc;
use feature_builder::{row_to_input, ModelInput, FEATURE_NAMES};
use tracing::{debug, info};

use crate::metrics::{mean_absolute_error, r2_score};
use crate::model::{RegressionModel, Regressor};
use crate::split::{train_test_split, SPLIT_SEED};

/// Fewest fully-labeled rows for which a horizon trains at all. Below
/// this the 80/20 split degenerates and the existing model artifact
/// stays authoritative.
pub const MIN_TRAINING_SAMPLES: usize = 25;

/// The winner for one horizon, ready to persist.
#[derive(Debug, Clone)]
pub struct HorizonTraining {
    pub model: RegressionModel,
    pub info: ModelInfo,
}

/// Rows eligible as training examples: every target resolved. Rows
/// with any pending target are excluded entirely.
#[must_use]
pub fn labeled_rows(rows: &[ObservationRow]) -> Vec<&ObservationRow> {
    rows.iter().filter(|row| row.fully_labeled()).collect()
}

/// Trains the candidate set for one horizon and selects the winner by
/// strictly lowest held-out MAE.
///
/// Returns `None` when fewer than [`MIN_TRAINING_SAMPLES`] rows are
/// available; the caller keeps the previous model in that case.
#[must_use]
pub fn train_horizon(labeled: &[&ObservationRow], horizon: Horizon) -> Option<HorizonTraining> {
    if labeled.len() < MIN_TRAINING_SAMPLES {
        return None;
    }

    let x: Vec<ModelInput> = labeled.iter().map(|row| row_to_input(row)).collect();
    let y: Vec<f64> = labeled
        .iter()
        .filter_map(|row| row.target(horizon))
        .collect();
    debug_assert_eq!(x.len(), y.len());

    let (train_idx, test_idx) = train_test_split(labeled.len(), SPLIT_SEED);
    let x_train: Vec<ModelInput> = train_idx.iter().map(|&i| x[i]).collect();
    let y_train: Vec<f64> = train_idx.iter().map(|&i| y[i]).collect();
    let y_test: Vec<f64> = test_idx.iter().map(|&i| y[i]).collect();

    let mut best: Option<(RegressionModel, f64, f64)> = None;

    for mut candidate in RegressionModel::candidates() {
        candidate.fit(&x_train, &y_train);

        let predictions: Vec<f64> = test_idx.iter().map(|&i| candidate.predict(&x[i])).collect();
        let mae = mean_absolute_error(&y_test, &predictions);
        debug!(%horizon, model = candidate.name(), mae, "scored candidate");

        if best.as_ref().map_or(true, |(_, best_mae, _)| mae < *best_mae) {
            let r2 = r2_score(&y_test, &predictions);
            best = Some((candidate, mae, r2));
        }
    }

    let (model, mae, r2) = best?;
    info!(
        %horizon,
        model = model.name(),
        mae,
        r2,
        samples = labeled.len(),
        "selected horizon model"
    );

    let info = ModelInfo {
        model_name: model.name().to_string(),
        mae,
        r2,
        features: FEATURE_NAMES.iter().map(|&name| name.to_string()).collect(),
        target: horizon.target_column().to_string(),
        trained_at: Utc::now(),
        training_samples: labeled.len(),
    };

    Some(HorizonTraining { model, info })
}
