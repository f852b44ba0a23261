//! Fixed-capacity approximate-membership filter for product ids.
//!
//! A classic Bloom filter: no false negatives, false positives bounded by
//! the configured error rate at the design capacity. It guards the
//! recommendation path, where a false positive merely produces an empty
//! recommendation. Callers that need certainty re-check the product store.

use ahash::RandomState;
use std::hash::BuildHasher;

/// Default design capacity (distinct ids).
pub const DEFAULT_CAPACITY: usize = 100_000;
/// Default target false-positive rate at design capacity.
pub const DEFAULT_ERROR_RATE: f64 = 0.001;

/// A Bloom filter over product ids.
///
/// Hash seeds are fixed so that filter behavior is reproducible across
/// process restarts and in tests.
#[derive(Debug)]
pub struct ExistenceFilter {
    bits: Vec<u64>,
    bit_count: u64,
    hash_count: u32,
    capacity: usize,
    hashers: [RandomState; 2],
    inserted: usize,
}

impl ExistenceFilter {
    /// Size the filter for `capacity` ids at `error_rate` using the standard
    /// Bloom formulas: `m = -n ln p / (ln 2)^2`, `k = (m / n) ln 2`.
    pub fn new(capacity: usize, error_rate: f64) -> Self {
        let n = capacity.max(1) as f64;
        let p = error_rate.clamp(1e-10, 0.5);
        let ln2 = std::f64::consts::LN_2;

        let bit_count = (((-n * p.ln()) / (ln2 * ln2)).ceil() as u64).max(64);
        let hash_count = (((bit_count as f64 / n) * ln2).round() as u32).max(1);

        Self {
            bits: vec![0u64; bit_count.div_ceil(64) as usize],
            bit_count,
            hash_count,
            capacity: capacity.max(1),
            hashers: [
                RandomState::with_seeds(
                    0x243f_6a88_85a3_08d3,
                    0x1319_8a2e_0370_7344,
                    0xa409_3822_299f_31d0,
                    0x082e_fa98_ec4e_6c89,
                ),
                RandomState::with_seeds(
                    0x4528_21e6_38d0_1377,
                    0xbe54_66cf_34e9_0c6c,
                    0xc0ac_29b7_c97c_50dd,
                    0x3f84_d5b5_b547_0917,
                ),
            ],
            inserted: 0,
        }
    }

    /// Register an id as present.
    pub fn add(&mut self, id: &str) {
        let (h1, h2) = self.hash_pair(id);
        for i in 0..self.hash_count {
            let bit = self.bit_index(h1, h2, i);
            self.bits[(bit / 64) as usize] |= 1 << (bit % 64);
        }
        self.inserted += 1;
    }

    /// Membership test: true for every id ever added; true for a never-added
    /// id with probability bounded by the configured error rate.
    pub fn contains(&self, id: &str) -> bool {
        let (h1, h2) = self.hash_pair(id);
        (0..self.hash_count).all(|i| {
            let bit = self.bit_index(h1, h2, i);
            self.bits[(bit / 64) as usize] & (1 << (bit % 64)) != 0
        })
    }

    /// The design capacity this filter was sized for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of `add` calls (not deduplicated).
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    fn hash_pair(&self, id: &str) -> (u64, u64) {
        let h1 = self.hashers[0].hash_one(id);
        // An even h2 would cycle through a subset of positions
        let h2 = self.hashers[1].hash_one(id) | 1;
        (h1, h2)
    }

    /// Kirsch-Mitzenmacher double hashing: position i = h1 + i * h2.
    fn bit_index(&self, h1: u64, h2: u64, i: u32) -> u64 {
        h1.wrapping_add(u64::from(i).wrapping_mul(h2)) % self.bit_count
    }
}

impl Default for ExistenceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_ERROR_RATE)
    }
}
