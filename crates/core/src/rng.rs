use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }

    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.below(len as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        let left: Vec<u64> = (0..16).map(|_| a.below(1000)).collect();
        let right: Vec<u64> = (0..16).map(|_| b.below(1000)).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn index_of_empty_is_none() {
        let mut rng = RngState::from_seed(1);
        assert_eq!(rng.index(0), None);
        assert!(rng.index(3).expect("index") < 3);
    }
}
