//! Scalar regression metrics.

/// Mean absolute error. Returns 0.0 for empty inputs.
#[must_use]
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    total / actual.len() as f64
}

/// Coefficient of determination. Returns 0.0 when the actual values
/// have no variance.
#[must_use]
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mae_of_known_errors() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [1.0, 3.0, 1.0, 4.0];
        assert_eq!(mean_absolute_error(&actual, &predicted), 0.75);
    }

    #[test]
    fn perfect_prediction_scores_r2_one() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(r2_score(&actual, &actual), 1.0);
    }

    #[test]
    fn mean_prediction_scores_r2_zero() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        assert_eq!(r2_score(&actual, &predicted), 0.0);
    }

    #[test]
    fn constant_actuals_do_not_divide_by_zero() {
        let actual = [5.0, 5.0];
        let predicted = [4.0, 6.0];
        assert_eq!(r2_score(&actual, &predicted), 0.0);
    }
}
