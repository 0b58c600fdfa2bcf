//! Deterministic RNG for round scheduling, rewards and card minting
//!
//! Every random decision in the engine goes through [`BattleRng`] so that a
//! match replayed with the same seed produces the same rounds and rewards.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Random source used by the engine
pub trait BattleRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Uniform float in [0, 1)
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Returns true with the given probability in whole percent
    fn chance(&mut self, percent: u32) -> bool {
        if percent == 0 {
            return false;
        }
        (self.gen_range(100) as u32) < percent
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_range(i + 1);
            slice.swap(i, j);
        }
    }

    /// Pick `count` distinct indices out of `len`, in draw order
    fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        for i in 0..take {
            let j = i + self.gen_range(len - i);
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }
}

/// XorShift32 RNG
///
/// Not cryptographically secure. The same seed always yields the same sequence.
#[derive(Debug, Clone, Encode, Decode, TypeInfo)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Fold a u64 seed into a non-zero u32 state
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    pub fn seed_from_u32(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_deterministic() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = XorShiftRng::seed_from_u64(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_chance_bounds() {
        let mut rng = XorShiftRng::seed_from_u64(99);
        for _ in 0..200 {
            assert!(!rng.chance(0));
            assert!(rng.chance(100));
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let picked = rng.sample_indices(10, 4);
        assert_eq!(picked.len(), 4);

        let mut sorted = picked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
        assert!(picked.iter().all(|i| *i < 10));

        // Asking for more than available caps at len
        assert_eq!(rng.sample_indices(2, 5).len(), 2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let mut arr = [1, 2, 3, 4, 5];

        rng.shuffle(&mut arr);

        let mut sorted = arr;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }
}
