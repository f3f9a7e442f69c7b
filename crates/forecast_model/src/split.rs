//! Deterministic train/test splitting.

use crate::rng::Lcg;

/// Fixed seed so every training run sees the same split.
pub const SPLIT_SEED: u64 = 42;

/// Fraction of samples held out for scoring.
pub const TEST_FRACTION: f64 = 0.2;

/// Splits `0..len` into shuffled (train, test) index sets.
///
/// The test set holds roughly [`TEST_FRACTION`] of the samples and at
/// least one; callers must ensure `len >= 2` so neither side is empty.
#[must_use]
pub fn train_test_split(len: usize, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..len).collect();
    Lcg::new(seed).shuffle(&mut indices);

    let test_len = ((len as f64 * TEST_FRACTION).round() as usize).clamp(1, len.saturating_sub(1));
    let train = indices.split_off(test_len);
    (train, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_is_disjoint_and_complete() {
        let (train, test) = train_test_split(100, SPLIT_SEED);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<usize>>());
    }

    #[test]
    fn split_is_reproducible() {
        assert_eq!(
            train_test_split(76, SPLIT_SEED),
            train_test_split(76, SPLIT_SEED)
        );
    }

    #[test]
    fn tiny_input_keeps_both_sides_non_empty() {
        let (train, test) = train_test_split(2, SPLIT_SEED);
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 1);
    }
}
