//! Seeded pseudo-randomness for reproducible training runs.

/// A small LCG, enough for shuffles and bootstrap sampling where the
/// only requirement is determinism under a fixed seed.
pub(crate) struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(12345),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        self.state >> 33
    }

    /// A value in `0..bound`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle(&mut self, values: &mut [usize]) {
        for i in (1..values.len()).rev() {
            let j = self.next_below(i + 1);
            values.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut values: Vec<usize> = (0..50).collect();
        let original = values.clone();

        Lcg::new(42).shuffle(&mut values);
        assert_ne!(values, original);

        values.sort_unstable();
        assert_eq!(values, original);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a: Vec<usize> = (0..20).collect();
        let mut b = a.clone();
        Lcg::new(7).shuffle(&mut a);
        Lcg::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn next_below_stays_in_range() {
        let mut rng = Lcg::new(1);
        for _ in 0..1000 {
            assert!(rng.next_below(10) < 10);
        }
    }
}
