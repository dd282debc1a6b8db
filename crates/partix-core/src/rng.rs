//! Deterministic random number generator
//!
//! Uses xorshift64 for reproducibility across platforms. For per-particle
//! randomness the generator is re-seeded from `(seed, position)` before each
//! particle is visited, so the values a particle receives do not depend on
//! which rank owns it or on the order particles are iterated in.

use serde::{Deserialize, Serialize};

/// Number of values discarded after a position reset
const WARMUP: usize = 4;

/// Mix three 64-bit words into one (splitmix64 finalizer chain)
pub fn hash_seed(seed: u64, a: u64, b: u64) -> u64 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    for word in [a, b] {
        h = h.wrapping_add(word).wrapping_add(0x9E37_79B9_7F4A_7C15);
        h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        h ^= h >> 31;
    }
    h
}

/// A deterministic random number generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift requires a non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Re-seed from a base seed and a spatial position
    ///
    /// Identical `(seed, position)` pairs always yield identical streams.
    pub fn reset(&mut self, seed: u64, position: &[f64; 3]) {
        let mut h = hash_seed(seed, 0, 0);
        for (slot, coord) in position.iter().enumerate() {
            h = hash_seed(h, coord.to_bits(), slot as u64);
        }
        self.state = if h == 0 { 1 } else { h };
        for _ in 0..WARMUP {
            self.next_u64();
        }
    }

    /// Get the current state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a uniform f64 in range [0, 1)
    pub fn uniform(&mut self) -> f64 {
        // top 53 bits give an exactly representable fraction
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seed: u64, x: &[f64; 3]) -> Rng {
        let mut rng = Rng::default();
        rng.reset(seed, x);
        rng
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = Rng::new(42);
        for _ in 0..1000 {
            let f = rng.uniform();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_position_reset_is_stateless() {
        let x = [1.25, -3.5, 7.0];
        let mut a = Rng::new(99);
        for _ in 0..17 {
            a.next_u64();
        }
        a.reset(7, &x);
        let b = at(7, &x);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_position_sensitivity() {
        let a = at(7, &[1.0, 2.0, 3.0]).uniform();
        let b = at(7, &[1.0, 2.0, 3.000001]).uniform();
        let c = at(8, &[1.0, 2.0, 3.0]).uniform();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_seed_determinism() {
        assert_eq!(hash_seed(100, 0, 5), hash_seed(100, 0, 5));
        assert_ne!(hash_seed(100, 0, 5), hash_seed(100, 1, 5));
        assert_ne!(hash_seed(100, 0, 5), hash_seed(100, 0, 6));
        assert_ne!(hash_seed(100, 0, 5), hash_seed(101, 0, 5));
    }
}
