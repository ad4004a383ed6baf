//! Random fixtures
//!
//! Random owners, amounts and currencies for tests and the load tool.
//! Each `RandomData` owns its generator; nothing is seeded process-wide.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::CreateAccountParams;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Currencies handed out by [`RandomData::currency`]
pub const CURRENCIES: [&str; 3] = ["EUR", "USD", "CAD"];

#[derive(Debug)]
pub struct RandomData {
    rng: StdRng,
}

impl RandomData {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Integer in `min..=max`
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Lowercase ASCII string of `len` letters
    pub fn string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    pub fn owner(&mut self) -> String {
        self.string(6)
    }

    /// Balance in minor units, `0..=1000`
    pub fn money(&mut self) -> i64 {
        self.int(0, 1000)
    }

    pub fn currency(&mut self) -> String {
        CURRENCIES[self.rng.gen_range(0..CURRENCIES.len())].to_string()
    }

    pub fn account_params(&mut self) -> CreateAccountParams {
        CreateAccountParams {
            owner: self.owner(),
            balance: self.money(),
            currency: self.currency(),
        }
    }
}

impl Default for RandomData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_bounds() {
        let mut random = RandomData::seeded(1);
        for _ in 0..1000 {
            let n = random.int(-3, 3);
            assert!((-3..=3).contains(&n));
        }
        assert_eq!(random.int(5, 5), 5);
    }

    #[test]
    fn test_owner_is_lowercase() {
        let owner = RandomData::new().owner();
        assert_eq!(owner.len(), 6);
        assert!(owner.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_account_params() {
        let params = RandomData::new().account_params();
        assert!((0..=1000).contains(&params.balance));
        assert!(CURRENCIES.contains(&params.currency.as_str()));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomData::seeded(42);
        let mut b = RandomData::seeded(42);
        assert_eq!(a.string(16), b.string(16));
        assert_eq!(a.money(), b.money());
    }
}
