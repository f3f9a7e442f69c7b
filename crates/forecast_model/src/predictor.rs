//! The prediction read path.

use aqi_structs::{Forecast, Horizon};
use feature_builder::FeatureRecord;
use tracing::warn;

use crate::artifacts::ModelArtifacts;
use crate::model::Regressor;

/// Produces the three-horizon forecast from the current feature
/// record.
///
/// Pure read path: never mutates the store or the artifacts it loads.
/// A horizon without a servable model degrades to the current AQI
/// value; that is documented behavior, not an error.
pub struct Predictor<'a> {
    artifacts: &'a ModelArtifacts,
}

impl<'a> Predictor<'a> {
    #[must_use]
    pub fn new(artifacts: &'a ModelArtifacts) -> Self {
        Self { artifacts }
    }

    pub async fn predict(&self, features: &FeatureRecord) -> Forecast {
        let input = features.to_model_input();
        let naive = f64::from(features.aqi);
        let mut values = [naive; 3];

        for (slot, horizon) in values.iter_mut().zip(Horizon::ALL) {
            match self.artifacts.load_model(horizon).await {
                Ok(Some(model)) => *slot = model.predict(&input),
                Ok(None) => {
                    warn!(%horizon, "no trained model, repeating current AQI");
                }
                Err(error) => {
                    warn!(%horizon, error = %error, "failed to load model, repeating current AQI");
                }
            }
        }

        Forecast {
            day1: values[0],
            day2: values[1],
            day3: values[2],
        }
    }
}
